use std::sync::Arc;

use permguard_application::permission_defaults::{
    default_module_catalog, default_ui_element_catalog,
};
use permguard_application::{
    PermissionResolver, PermissionSnapshotStore, PermissionStore, RouteService,
};
use permguard_core::AppError;
use permguard_infrastructure::{
    InMemoryPermissionSnapshotStore, JsonFilePermissionSnapshotStore,
    PostgresPermissionSnapshotStore,
};
use tracing::info;

use crate::api_config::{ApiConfig, PermissionBackendConfig};
use crate::state::AppState;

use super::database::connect_and_migrate;

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let snapshots: Arc<dyn PermissionSnapshotStore> = match &config.permission_backend {
        PermissionBackendConfig::Memory => Arc::new(InMemoryPermissionSnapshotStore::new()),
        PermissionBackendConfig::File { directory } => Arc::new(
            JsonFilePermissionSnapshotStore::new(directory.clone(), config.storage_key.as_str())?,
        ),
        PermissionBackendConfig::Postgres { database_url } => {
            let pool = connect_and_migrate(database_url.as_str()).await?;
            Arc::new(PostgresPermissionSnapshotStore::new(
                pool,
                config.storage_key.as_str(),
            ))
        }
    };

    let app_state = app_state_from_snapshots(snapshots)?;

    // Seed eagerly so a broken backend fails at startup rather than on first request.
    let permission_state = app_state.permission_store.load().await?;
    info!(
        backend = config.permission_backend.name(),
        storage_key = %config.storage_key,
        users = permission_state.users().len(),
        roles = permission_state.roles().len(),
        "permission document ready"
    );

    Ok(app_state)
}

pub fn app_state_from_snapshots(
    snapshots: Arc<dyn PermissionSnapshotStore>,
) -> Result<AppState, AppError> {
    let permission_store = PermissionStore::new(snapshots);
    let permission_resolver = PermissionResolver::new(permission_store.clone());
    let route_service = RouteService::new(permission_resolver.clone());

    Ok(AppState {
        permission_store,
        permission_resolver,
        route_service,
        ui_element_catalog: Arc::new(default_ui_element_catalog()?),
        module_catalog: Arc::new(default_module_catalog()?),
    })
}
