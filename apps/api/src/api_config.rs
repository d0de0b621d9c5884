use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use permguard_application::permission_defaults::DEFAULT_STORAGE_KEY;
use permguard_core::AppError;
use tracing_subscriber::EnvFilter;

/// Where the permission document is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionBackendConfig {
    Memory,
    File { directory: PathBuf },
    Postgres { database_url: String },
}

impl PermissionBackendConfig {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File { .. } => "file",
            Self::Postgres { .. } => "postgres",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub storage_key: String,
    pub permission_backend: PermissionBackendConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let frontend_url = lookup("FRONTEND_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = match lookup("API_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))?,
            None => 3001,
        };

        let storage_key =
            lookup("PERMISSION_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_owned());
        if storage_key.trim().is_empty() {
            return Err(AppError::Validation(
                "PERMISSION_STORAGE_KEY must not be empty".to_owned(),
            ));
        }

        let permission_backend = match lookup("PERMISSION_STORE")
            .unwrap_or_else(|| "file".to_owned())
            .as_str()
        {
            "memory" => PermissionBackendConfig::Memory,
            "file" => PermissionBackendConfig::File {
                directory: PathBuf::from(
                    lookup("PERMISSION_STORE_DIR").unwrap_or_else(|| "./data".to_owned()),
                ),
            },
            "postgres" => PermissionBackendConfig::Postgres {
                database_url: required_non_empty(&lookup, "DATABASE_URL")?,
            },
            other => {
                return Err(AppError::Validation(format!(
                    "PERMISSION_STORE must be one of 'memory', 'file' or 'postgres', got '{other}'"
                )));
            }
        };

        Ok(Self {
            frontend_url,
            api_host,
            api_port,
            storage_key,
            permission_backend,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use permguard_core::AppError;

    use super::{ApiConfig, PermissionBackendConfig};

    fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_use_file_backend_on_local_address() {
        let Ok(config) = load(&[]) else {
            panic!("defaults must load");
        };

        assert_eq!(config.api_port, 3001);
        assert_eq!(config.storage_key, "permission_system_data");
        assert_eq!(
            config.permission_backend,
            PermissionBackendConfig::File {
                directory: PathBuf::from("./data")
            }
        );
        assert!(matches!(
            config.socket_address(),
            Ok(address) if address.to_string() == "127.0.0.1:3001"
        ));
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        assert!(matches!(
            load(&[("PERMISSION_STORE", "postgres")]),
            Err(AppError::Validation(_))
        ));

        let loaded = load(&[
            ("PERMISSION_STORE", "postgres"),
            ("DATABASE_URL", "postgres://localhost/permguard"),
        ]);
        assert!(matches!(
            loaded,
            Ok(config) if config.permission_backend.name() == "postgres"
        ));
    }

    #[test]
    fn invalid_values_are_validation_errors() {
        assert!(matches!(
            load(&[("PERMISSION_STORE", "redis")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load(&[("API_PORT", "not-a-port")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load(&[("PERMISSION_STORAGE_KEY", "  ")]),
            Err(AppError::Validation(_))
        ));

        let Ok(config) = load(&[("API_HOST", "localhost")]) else {
            panic!("host is only parsed when binding");
        };
        assert!(matches!(
            config.socket_address(),
            Err(AppError::Validation(_))
        ));
    }
}
