use async_trait::async_trait;
use permguard_application::{PermissionSnapshotStore, VersionedSnapshot};
use permguard_core::{AppError, AppResult};
use permguard_domain::PermissionState;
use sqlx::PgPool;
use tracing::debug;

/// PostgreSQL-backed permission document, one row per storage key.
#[derive(Clone)]
pub struct PostgresPermissionSnapshotStore {
    pool: PgPool,
    storage_key: String,
}

impl PostgresPermissionSnapshotStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool, storage_key: impl Into<String>) -> Self {
        Self {
            pool,
            storage_key: storage_key.into(),
        }
    }
}

fn to_db_revision(revision: u64) -> AppResult<i64> {
    i64::try_from(revision).map_err(|_| {
        AppError::Internal(format!("permission document revision {revision} out of range"))
    })
}

fn from_db_revision(revision: i64) -> AppResult<u64> {
    u64::try_from(revision).map_err(|_| {
        AppError::Internal(format!("stored permission document revision {revision} is negative"))
    })
}

fn encode_document(state: &PermissionState) -> AppResult<String> {
    serde_json::to_string(state).map_err(|error| {
        AppError::Internal(format!("failed to encode permission document: {error}"))
    })
}

#[async_trait]
impl PermissionSnapshotStore for PostgresPermissionSnapshotStore {
    async fn load(&self) -> AppResult<Option<VersionedSnapshot>> {
        let row = sqlx::query_as::<_, (i64, String)>(
            r#"
            SELECT revision, document::text
            FROM permission_snapshots
            WHERE storage_key = $1
            "#,
        )
        .bind(self.storage_key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load permission document: {error}"))
        })?;

        let Some((revision, document)) = row else {
            return Ok(None);
        };

        let state = serde_json::from_str::<PermissionState>(document.as_str()).map_err(|error| {
            AppError::Internal(format!("failed to decode permission document: {error}"))
        })?;

        Ok(Some(VersionedSnapshot {
            revision: from_db_revision(revision)?,
            state,
        }))
    }

    async fn save(
        &self,
        state: &PermissionState,
        expected_revision: Option<u64>,
    ) -> AppResult<u64> {
        let document = encode_document(state)?;

        let written = match expected_revision {
            None => sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO permission_snapshots (storage_key, revision, document)
                VALUES ($1, 1, $2::jsonb)
                ON CONFLICT (storage_key) DO NOTHING
                RETURNING revision
                "#,
            )
            .bind(self.storage_key.as_str())
            .bind(document.as_str())
            .fetch_optional(&self.pool)
            .await,
            Some(expected) => sqlx::query_scalar::<_, i64>(
                r#"
                UPDATE permission_snapshots
                SET revision = revision + 1,
                    document = $3::jsonb,
                    updated_at = now()
                WHERE storage_key = $1 AND revision = $2
                RETURNING revision
                "#,
            )
            .bind(self.storage_key.as_str())
            .bind(to_db_revision(expected)?)
            .bind(document.as_str())
            .fetch_optional(&self.pool)
            .await,
        }
        .map_err(|error| {
            AppError::Internal(format!("failed to save permission document: {error}"))
        })?;

        let Some(revision) = written else {
            return Err(AppError::Conflict(format!(
                "permission document '{}' changed since revision {expected_revision:?}",
                self.storage_key
            )));
        };

        debug!(storage_key = %self.storage_key, revision, "wrote permission document");
        from_db_revision(revision)
    }
}

#[cfg(test)]
mod tests {
    use permguard_application::permission_defaults::default_permission_state;
    use permguard_application::{PermissionSnapshotStore, PermissionStore};
    use permguard_core::AppError;
    use sqlx::PgPool;
    use sqlx::migrate::Migrator;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    use super::PostgresPermissionSnapshotStore;

    static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

    async fn test_pool() -> Option<PgPool> {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            return None;
        };

        let pool = match PgPoolOptions::new()
            .max_connections(2)
            .connect(database_url.as_str())
            .await
        {
            Ok(pool) => pool,
            Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
        };

        if let Err(error) = MIGRATOR.run(&pool).await {
            panic!("failed to run migrations for postgres permission tests: {error}");
        }

        Some(pool)
    }

    fn storage_key() -> String {
        format!("permission_test_{}", uuid::Uuid::new_v4())
    }

    #[tokio::test]
    async fn document_roundtrips_with_revision_checks() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let store = PostgresPermissionSnapshotStore::new(pool, storage_key());
        let Ok(state) = default_permission_state() else {
            panic!("default state must be valid");
        };

        assert!(matches!(store.load().await, Ok(None)));
        assert!(matches!(store.save(&state, None).await, Ok(1)));
        assert!(matches!(
            store.save(&state, None).await,
            Err(AppError::Conflict(_))
        ));
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

    #[tokio::test]
    async fn store_seeds_once_across_handles() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let key = storage_key();
        let left = PermissionStore::new(Arc::new(PostgresPermissionSnapshotStore::new(
            pool.clone(),
            key.clone(),
        )));
        let right = PermissionStore::new(Arc::new(PostgresPermissionSnapshotStore::new(pool, key)));

        let (left_state, right_state) = tokio::join!(left.load(), right.load());

        let (Ok(left_state), Ok(right_state)) = (left_state, right_state) else {
            panic!("both handles must load");
        };
        assert_eq!(left_state, right_state);
    }
}
