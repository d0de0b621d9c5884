use std::collections::BTreeMap;

use permguard_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{
    FALLBACK_ROLE_ID, Role, RoleId, RolePermissions, RolePermissionsPatch, User, UserId,
};

/// Document layout version written by this crate.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

/// Aggregate root persisted as one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionState {
    #[serde(default = "current_schema_version")]
    schema_version: u32,
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    roles: Vec<Role>,
    #[serde(default)]
    permissions: BTreeMap<String, RolePermissions>,
}

impl PermissionState {
    /// Creates a validated state at the current schema version.
    pub fn new(
        users: Vec<User>,
        roles: Vec<Role>,
        permissions: Vec<RolePermissions>,
    ) -> AppResult<Self> {
        let state = Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            users,
            roles,
            permissions: permissions
                .into_iter()
                .map(|record| (record.role_id().as_str().to_owned(), record))
                .collect(),
        };
        state.validate()?;
        Ok(state)
    }

    /// Checks the schema version and identity invariants of a loaded document.
    pub fn validate(&self) -> AppResult<()> {
        if self.schema_version != CURRENT_SCHEMA_VERSION {
            return Err(AppError::Validation(format!(
                "unsupported permission document schema version {}",
                self.schema_version
            )));
        }

        let mut role_ids = std::collections::HashSet::new();
        for role in &self.roles {
            if !role_ids.insert(role.id().as_str()) {
                return Err(AppError::Validation(format!(
                    "duplicate role id '{}'",
                    role.id()
                )));
            }
        }

        let mut user_ids = std::collections::HashSet::new();
        for user in &self.users {
            if !user_ids.insert(user.id().as_str()) {
                return Err(AppError::Validation(format!(
                    "duplicate user id '{}'",
                    user.id()
                )));
            }
        }

        for (key, record) in &self.permissions {
            if key != record.role_id().as_str() {
                return Err(AppError::Validation(format!(
                    "permission record '{key}' is owned by role '{}'",
                    record.role_id()
                )));
            }
        }

        Ok(())
    }

    /// Returns the document schema version.
    #[must_use]
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// Returns all users in insertion order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        self.users.as_slice()
    }

    /// Returns all roles in insertion order.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        self.roles.as_slice()
    }

    /// Returns every permission record keyed by role id.
    #[must_use]
    pub fn permissions(&self) -> &BTreeMap<String, RolePermissions> {
        &self.permissions
    }

    /// Finds a user by id.
    #[must_use]
    pub fn find_user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id().as_str() == user_id)
    }

    /// Finds a role by id.
    #[must_use]
    pub fn find_role(&self, role_id: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.id().as_str() == role_id)
    }

    /// Returns whether a role exists.
    #[must_use]
    pub fn contains_role(&self, role_id: &str) -> bool {
        self.find_role(role_id).is_some()
    }

    /// Returns the permission record of a role.
    #[must_use]
    pub fn role_permissions(&self, role_id: &str) -> Option<&RolePermissions> {
        self.permissions.get(role_id)
    }

    /// Returns the permission record of the user's role, if both exist.
    #[must_use]
    pub fn user_permissions(&self, user_id: &str) -> Option<&RolePermissions> {
        self.find_user(user_id)
            .and_then(|user| self.role_permissions(user.role().as_str()))
    }

    /// Appends a user; its id and role must be known.
    pub fn add_user(&mut self, user: User) -> AppResult<()> {
        if self.find_user(user.id().as_str()).is_some() {
            return Err(AppError::Conflict(format!(
                "user '{}' already exists",
                user.id()
            )));
        }
        self.ensure_role_exists(user.role())?;
        self.users.push(user);
        Ok(())
    }

    /// Applies `update` to a user and re-checks its role reference.
    pub fn update_user<F>(&mut self, user_id: &UserId, update: F) -> AppResult<User>
    where
        F: FnOnce(&mut User) -> AppResult<()>,
    {
        let index = self
            .users
            .iter()
            .position(|user| user.id() == user_id)
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))?;

        let mut updated = self.users[index].clone();
        update(&mut updated)?;
        self.ensure_role_exists(updated.role())?;
        self.users[index] = updated.clone();
        Ok(updated)
    }

    /// Removes a user, returning whether it existed.
    pub fn remove_user(&mut self, user_id: &UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|user| user.id() != user_id);
        self.users.len() != before
    }

    /// Appends a role together with an empty permission record.
    pub fn add_role(&mut self, role: Role) -> AppResult<()> {
        if self.contains_role(role.id().as_str()) {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                role.id()
            )));
        }
        self.permissions.insert(
            role.id().as_str().to_owned(),
            RolePermissions::empty(role.id().clone()),
        );
        self.roles.push(role);
        Ok(())
    }

    /// Applies `update` to a role.
    pub fn update_role<F>(&mut self, role_id: &RoleId, update: F) -> AppResult<Role>
    where
        F: FnOnce(&mut Role) -> AppResult<()>,
    {
        let role = self
            .roles
            .iter_mut()
            .find(|role| role.id() == role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' not found")))?;

        let mut updated = role.clone();
        update(&mut updated)?;
        *role = updated.clone();
        Ok(updated)
    }

    /// Removes a role and its permission record, moving its users to the fallback role.
    ///
    /// Returns the number of reassigned users, or `None` when the role is unknown.
    pub fn remove_role(&mut self, role_id: &RoleId) -> AppResult<Option<usize>> {
        if role_id.is_superadmin() {
            return Err(AppError::ProtectedRole(role_id.to_string()));
        }
        if role_id.is_fallback() {
            return Err(AppError::Validation(format!(
                "role '{role_id}' receives reassigned users and cannot be deleted"
            )));
        }
        if !self.contains_role(role_id.as_str()) {
            return Ok(None);
        }

        let fallback = RoleId::new(FALLBACK_ROLE_ID)?;
        self.ensure_role_exists(&fallback)?;

        let mut reassigned = 0;
        for user in self.users.iter_mut().filter(|user| user.role() == role_id) {
            user.assign_role(fallback.clone());
            reassigned += 1;
        }

        self.roles.retain(|role| role.id() != role_id);
        self.permissions.remove(role_id.as_str());
        Ok(Some(reassigned))
    }

    /// Merges a patch into a role's record, creating the record if absent.
    pub fn upsert_permissions(
        &mut self,
        role_id: &RoleId,
        patch: &RolePermissionsPatch,
    ) -> AppResult<RolePermissions> {
        patch.validate()?;

        let record = self
            .permissions
            .entry(role_id.as_str().to_owned())
            .or_insert_with(|| RolePermissions::empty(role_id.clone()));
        record.apply(patch);
        Ok(record.clone())
    }

    fn ensure_role_exists(&self, role_id: &RoleId) -> AppResult<()> {
        if self.contains_role(role_id.as_str()) {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "role '{role_id}' does not exist"
            )))
        }
    }
}
