use async_trait::async_trait;

use permguard_core::AppResult;
use permguard_domain::PermissionState;

/// Persisted permission state together with the backend revision it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedSnapshot {
    /// Backend-maintained counter, bumped on every successful write.
    pub revision: u64,
    /// Decoded permission document.
    pub state: PermissionState,
}

/// Durable storage for the permission document.
#[async_trait]
pub trait PermissionSnapshotStore: Send + Sync {
    /// Returns the stored document, or `None` when nothing has been written yet.
    async fn load(&self) -> AppResult<Option<VersionedSnapshot>>;

    /// Writes the full document and returns the new revision.
    ///
    /// `expected_revision` of `None` creates the document and fails with
    /// `AppError::Conflict` if one already exists. `Some(revision)` replaces the
    /// document only if the stored revision still matches.
    async fn save(
        &self,
        state: &PermissionState,
        expected_revision: Option<u64>,
    ) -> AppResult<u64>;
}
