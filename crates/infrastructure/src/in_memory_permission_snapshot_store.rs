use async_trait::async_trait;
use permguard_application::{PermissionSnapshotStore, VersionedSnapshot};
use permguard_core::{AppError, AppResult};
use permguard_domain::PermissionState;
use tokio::sync::RwLock;

/// Process-local permission document, lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryPermissionSnapshotStore {
    snapshot: RwLock<Option<VersionedSnapshot>>,
}

impl InMemoryPermissionSnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermissionSnapshotStore for InMemoryPermissionSnapshotStore {
    async fn load(&self) -> AppResult<Option<VersionedSnapshot>> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(
        &self,
        state: &PermissionState,
        expected_revision: Option<u64>,
    ) -> AppResult<u64> {
        let mut snapshot = self.snapshot.write().await;
        let current_revision = snapshot.as_ref().map(|stored| stored.revision);

        if current_revision != expected_revision {
            return Err(AppError::Conflict(format!(
                "permission document revision is {current_revision:?}, expected {expected_revision:?}"
            )));
        }

        let revision = current_revision.unwrap_or(0) + 1;
        *snapshot = Some(VersionedSnapshot {
            revision,
            state: state.clone(),
        });

        Ok(revision)
    }
}

#[cfg(test)]
mod tests {
    use permguard_application::PermissionSnapshotStore;
    use permguard_application::permission_defaults::default_permission_state;
    use permguard_core::AppError;

    use super::InMemoryPermissionSnapshotStore;

    #[tokio::test]
    async fn create_only_succeeds_once() {
        let store = InMemoryPermissionSnapshotStore::new();
        let Ok(state) = default_permission_state() else {
            panic!("default state must be valid");
        };

        assert!(matches!(store.load().await, Ok(None)));
        assert!(matches!(store.save(&state, None).await, Ok(1)));
        assert!(matches!(
            store.save(&state, None).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn stale_revision_is_rejected() {
        let store = InMemoryPermissionSnapshotStore::new();
        let Ok(state) = default_permission_state() else {
            panic!("default state must be valid");
        };

        assert!(store.save(&state, None).await.is_ok());
        assert!(matches!(store.save(&state, Some(1)).await, Ok(2)));
        assert!(matches!(
            store.save(&state, Some(1)).await,
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            store.load().await,
            Ok(Some(snapshot)) if snapshot.revision == 2 && snapshot.state == state
        ));
    }
}
