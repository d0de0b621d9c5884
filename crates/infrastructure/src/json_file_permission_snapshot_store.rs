use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use permguard_application::{PermissionSnapshotStore, VersionedSnapshot};
use permguard_core::{AppError, AppResult};
use permguard_domain::{PermissionState, validate_grant_key};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

/// On-disk layout: the permission document with its revision alongside.
#[derive(Serialize)]
struct StoredDocumentRef<'a> {
    revision: u64,
    #[serde(flatten)]
    state: &'a PermissionState,
}

#[derive(Deserialize)]
struct StoredDocument {
    #[serde(default)]
    revision: u64,
    #[serde(flatten)]
    state: PermissionState,
}

/// Permission document kept as one pretty-printed JSON file.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// readers never observe a partially written document.
#[derive(Debug)]
pub struct JsonFilePermissionSnapshotStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFilePermissionSnapshotStore {
    /// Creates a store writing `<directory>/<storage_key>.json`.
    pub fn new(directory: impl Into<PathBuf>, storage_key: &str) -> AppResult<Self> {
        validate_grant_key(storage_key).map_err(|_| {
            AppError::Validation(format!(
                "storage key '{storage_key}' is not a valid file name"
            ))
        })?;
        if storage_key.contains(['/', '\\']) {
            return Err(AppError::Validation(format!(
                "storage key '{storage_key}' must not contain path separators"
            )));
        }

        Ok(Self {
            path: directory.into().join(format!("{storage_key}.json")),
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    async fn read_document(&self) -> AppResult<Option<StoredDocument>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read permission document '{}': {error}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_slice(&raw).map(Some).map_err(|error| {
            AppError::Internal(format!(
                "failed to decode permission document '{}': {error}",
                self.path.display()
            ))
        })
    }

    async fn write_document(&self, document: &StoredDocumentRef<'_>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                AppError::Internal(format!(
                    "failed to create permission store directory '{}': {error}",
                    parent.display()
                ))
            })?;
        }

        let payload = serde_json::to_vec_pretty(document).map_err(|error| {
            AppError::Internal(format!("failed to encode permission document: {error}"))
        })?;

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, payload)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to write permission document '{}': {error}",
                    temp_path.display()
                ))
            })?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to replace permission document '{}': {error}",
                    self.path.display()
                ))
            })
    }
}

#[async_trait]
impl PermissionSnapshotStore for JsonFilePermissionSnapshotStore {
    async fn load(&self) -> AppResult<Option<VersionedSnapshot>> {
        Ok(self
            .read_document()
            .await?
            .map(|document| VersionedSnapshot {
                revision: document.revision,
                state: document.state,
            }))
    }

    async fn save(
        &self,
        state: &PermissionState,
        expected_revision: Option<u64>,
    ) -> AppResult<u64> {
        let _guard = self.write_lock.lock().await;
        let current_revision = self
            .read_document()
            .await?
            .map(|document| document.revision);

        if current_revision != expected_revision {
            return Err(AppError::Conflict(format!(
                "permission document '{}' is at revision {current_revision:?}, expected {expected_revision:?}",
                self.path.display()
            )));
        }

        let revision = current_revision.map_or(1, |current| current + 1);
        self.write_document(&StoredDocumentRef { revision, state })
            .await?;

        debug!(path = %self.path.display(), revision, "wrote permission document");
        Ok(revision)
    }
}
