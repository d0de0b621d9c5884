use permguard_core::AppResult;
use permguard_domain::{RoleId, RolePermissions, RolePermissionsPatch};
use tracing::info;

use super::PermissionStore;

impl PermissionStore {
    /// Returns the permission record of a role, if one exists.
    pub async fn get_role_permissions(&self, role_id: &str) -> AppResult<Option<RolePermissions>> {
        Ok(self.load().await?.role_permissions(role_id).cloned())
    }

    /// Returns every role's permission record.
    pub async fn get_all_permissions(&self) -> AppResult<Vec<RolePermissions>> {
        Ok(self.load().await?.permissions().values().cloned().collect())
    }

    /// Merges `patch` into the role's record, creating the record when absent.
    ///
    /// Keys present in a patched tier overwrite; keys absent stay as they were.
    pub async fn upsert_role_permissions(
        &self,
        role_id: &str,
        patch: RolePermissionsPatch,
    ) -> AppResult<RolePermissions> {
        let role_id = RoleId::new(role_id)?;
        patch.validate()?;

        let record = self
            .mutate("upsert_role_permissions", |state| {
                state.upsert_permissions(&role_id, &patch)
            })
            .await?;

        info!(role_id = %role_id, "role permissions updated");
        Ok(record)
    }
}
