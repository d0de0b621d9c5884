use permguard_core::{AppError, AppResult};
use permguard_domain::{PermissionState, Role, RoleId};
use tracing::{debug, info};

use super::{NewRole, PermissionStore, RoleUpdate};

impl PermissionStore {
    /// Lists all roles.
    pub async fn get_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.load().await?.roles().to_vec())
    }

    /// Creates a role with a time-based id and an empty permission record.
    pub async fn create_role(&self, input: NewRole) -> AppResult<Role> {
        let role = self
            .mutate("create_role", move |state| {
                let role = Role::new(next_role_id(state)?, input.name, input.color_tag)?;
                state.add_role(role.clone())?;
                Ok(role)
            })
            .await?;

        info!(role_id = %role.id(), "role created");
        Ok(role)
    }

    /// Applies a partial update to a role.
    pub async fn update_role(&self, role_id: &str, update: RoleUpdate) -> AppResult<Role> {
        let role_id = RoleId::new(role_id)?;
        let role = self
            .mutate("update_role", |state| {
                state.update_role(&role_id, |role| {
                    if let Some(name) = update.name {
                        role.rename(name)?;
                    }
                    if let Some(color_tag) = update.color_tag {
                        role.recolor(color_tag);
                    }
                    Ok(())
                })
            })
            .await?;

        info!(role_id = %role.id(), "role updated");
        Ok(role)
    }

    /// Deletes a role, moving its users to the fallback role.
    ///
    /// The superadmin role is protected. Unknown roles are a no-op; the
    /// return value tells whether a role was removed.
    pub async fn delete_role(&self, role_id: &str) -> AppResult<bool> {
        let role_id = RoleId::new(role_id)?;
        let removed = self
            .mutate("delete_role", |state| state.remove_role(&role_id))
            .await?;

        match removed {
            Some(reassigned) => {
                info!(role_id = %role_id, reassigned, "role deleted");
                Ok(true)
            }
            None => {
                debug!(role_id = %role_id, "role not found, nothing deleted");
                Ok(false)
            }
        }
    }
}

/// Millisecond timestamp id, bumped until it is unused.
fn next_role_id(state: &PermissionState) -> AppResult<RoleId> {
    let mut candidate = chrono::Utc::now().timestamp_millis();
    while state.contains_role(candidate.to_string().as_str()) {
        candidate = candidate
            .checked_add(1)
            .ok_or_else(|| AppError::Internal("role id space exhausted".to_owned()))?;
    }

    RoleId::new(candidate.to_string())
}
