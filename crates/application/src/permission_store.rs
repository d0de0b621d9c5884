use std::sync::Arc;

use permguard_core::{AppError, AppResult};
use permguard_domain::PermissionState;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::permission_defaults::default_permission_state;
use crate::{PermissionSnapshotStore, VersionedSnapshot};

mod inputs;
mod permissions;
mod roles;
mod users;

pub use inputs::{NewRole, NewUser, RoleUpdate, UserUpdate};

/// Shared handle over the permission document.
///
/// Reads always go to the backend. Mutations are serialized inside the process
/// and written with a revision check so a concurrent writer elsewhere surfaces
/// as `AppError::Conflict` instead of a silent overwrite.
#[derive(Clone)]
pub struct PermissionStore {
    snapshots: Arc<dyn PermissionSnapshotStore>,
    write_lock: Arc<Mutex<()>>,
}

impl PermissionStore {
    /// Creates a store over a persistence backend.
    #[must_use]
    pub fn new(snapshots: Arc<dyn PermissionSnapshotStore>) -> Self {
        Self {
            snapshots,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the persisted state, seeding built-in defaults on first access.
    pub async fn load(&self) -> AppResult<PermissionState> {
        Ok(self.load_snapshot().await?.state)
    }

    /// Replaces the whole persisted document.
    ///
    /// Writing a state equal to the stored one is skipped.
    pub async fn save(&self, state: PermissionState) -> AppResult<()> {
        state.validate()?;

        let _guard = self.write_lock.lock().await;
        let current = self.load_snapshot().await?;
        if current.state == state {
            debug!(revision = current.revision, "permission state unchanged, skipping save");
            return Ok(());
        }

        let revision = self
            .write_snapshot("save", &state, current.revision)
            .await?;
        info!(revision, "permission state replaced");
        Ok(())
    }

    pub(crate) async fn load_snapshot(&self) -> AppResult<VersionedSnapshot> {
        if let Some(snapshot) = self.snapshots.load().await? {
            snapshot.state.validate()?;
            return Ok(snapshot);
        }

        let seeded = default_permission_state()?;
        match self.snapshots.save(&seeded, None).await {
            Ok(revision) => {
                info!(
                    revision,
                    roles = seeded.roles().len(),
                    users = seeded.users().len(),
                    "seeded permission store with built-in defaults"
                );
                Ok(VersionedSnapshot {
                    revision,
                    state: seeded,
                })
            }
            Err(AppError::Conflict(_)) => {
                debug!("permission store was seeded concurrently, re-reading");
                let snapshot = self.snapshots.load().await?.ok_or_else(|| {
                    AppError::Internal(
                        "permission document missing after concurrent seed".to_owned(),
                    )
                })?;
                snapshot.state.validate()?;
                Ok(snapshot)
            }
            Err(error) => Err(error),
        }
    }

    /// Runs one read-modify-write cycle under the process-wide write lock.
    async fn mutate<T, F>(&self, operation: &'static str, mutation: F) -> AppResult<T>
    where
        F: FnOnce(&mut PermissionState) -> AppResult<T>,
    {
        let _guard = self.write_lock.lock().await;
        let VersionedSnapshot {
            revision,
            mut state,
        } = self.load_snapshot().await?;
        let before = state.clone();

        let output = mutation(&mut state)?;
        if state == before {
            debug!(operation, revision, "mutation left permission state unchanged");
            return Ok(output);
        }

        self.write_snapshot(operation, &state, revision).await?;
        Ok(output)
    }

    async fn write_snapshot(
        &self,
        operation: &'static str,
        state: &PermissionState,
        expected_revision: u64,
    ) -> AppResult<u64> {
        match self.snapshots.save(state, Some(expected_revision)).await {
            Ok(revision) => {
                debug!(operation, revision, "persisted permission state");
                Ok(revision)
            }
            Err(AppError::Conflict(message)) => {
                warn!(
                    operation,
                    expected_revision, "permission state was changed by another writer"
                );
                Err(AppError::Conflict(message))
            }
            Err(error) => Err(error),
        }
    }
}
