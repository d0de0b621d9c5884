use permguard_core::{AppError, AppResult};
use permguard_domain::{RoleId, User, UserId};
use tracing::info;

use super::{NewUser, PermissionStore, UserUpdate};

impl PermissionStore {
    /// Lists all users.
    pub async fn get_users(&self) -> AppResult<Vec<User>> {
        Ok(self.load().await?.users().to_vec())
    }

    /// Creates a user with a freshly generated id.
    pub async fn create_user(&self, input: NewUser) -> AppResult<User> {
        let user = User::new(
            UserId::new(uuid::Uuid::new_v4().to_string())?,
            input.name,
            input.email,
            RoleId::new(input.role)?,
            input.status,
        )?;

        let created = user.clone();
        self.mutate("create_user", move |state| state.add_user(user))
            .await?;

        info!(user_id = %created.id(), role = %created.role(), "user created");
        Ok(created)
    }

    /// Applies a partial update to a user.
    pub async fn update_user(&self, user_id: &str, update: UserUpdate) -> AppResult<User> {
        let user_id = UserId::new(user_id)?;
        let updated = self
            .mutate("update_user", |state| {
                state.update_user(&user_id, |user| {
                    if let Some(name) = update.name {
                        user.rename(name)?;
                    }
                    if let Some(email) = update.email {
                        user.change_email(email)?;
                    }
                    if let Some(role) = update.role {
                        user.assign_role(RoleId::new(role)?);
                    }
                    if let Some(status) = update.status {
                        user.set_status(status);
                    }
                    Ok(())
                })
            })
            .await?;

        info!(user_id = %updated.id(), role = %updated.role(), "user updated");
        Ok(updated)
    }

    /// Deletes a user.
    pub async fn delete_user(&self, user_id: &str) -> AppResult<()> {
        let user_id = UserId::new(user_id)?;
        let removed = self
            .mutate("delete_user", |state| Ok(state.remove_user(&user_id)))
            .await?;

        if !removed {
            return Err(AppError::NotFound(format!(
                "user '{user_id}' not found"
            )));
        }

        info!(user_id = %user_id, "user deleted");
        Ok(())
    }
}
