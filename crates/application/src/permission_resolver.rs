use permguard_core::AppResult;
use permguard_domain::{
    AccessCriteria, ModuleDescriptor, RoleId, RolePermissions, UiElementCatalog,
    UiElementDescriptor,
};

use crate::PermissionStore;

/// Answers access questions for users and roles.
///
/// Lookup misses (unknown user, unknown role, absent key) resolve to a denial,
/// never an error. Only backend failures are returned as errors.
#[derive(Clone)]
pub struct PermissionResolver {
    store: PermissionStore,
}

impl PermissionResolver {
    /// Creates a resolver reading from `store`.
    #[must_use]
    pub fn new(store: PermissionStore) -> Self {
        Self { store }
    }

    /// Returns the underlying store handle.
    #[must_use]
    pub fn store(&self) -> &PermissionStore {
        &self.store
    }

    /// Resolves the permission record of the user's role.
    ///
    /// `None` when the user does not exist. A user whose role has no record
    /// gets an all-deny record for that role.
    pub async fn user_permissions(&self, user_id: &str) -> AppResult<Option<RolePermissions>> {
        let state = self.store.load().await?;
        let Some(user) = state.find_user(user_id) else {
            return Ok(None);
        };

        Ok(Some(
            state
                .role_permissions(user.role().as_str())
                .cloned()
                .unwrap_or_else(|| RolePermissions::empty(user.role().clone())),
        ))
    }

    /// Resolves the permission record of a role, all-deny when it has none.
    pub async fn for_role(&self, role_id: &str) -> AppResult<RolePermissions> {
        let role_id = RoleId::new(role_id)?;
        let state = self.store.load().await?;

        Ok(state
            .role_permissions(role_id.as_str())
            .cloned()
            .unwrap_or_else(|| RolePermissions::empty(role_id)))
    }

    /// Returns whether the user's role grants the module.
    pub async fn has_module_access(&self, user_id: &str, module_id: &str) -> AppResult<bool> {
        self.check(user_id, |permissions| permissions.has_module_access(module_id))
            .await
    }

    /// Returns whether the user's role grants the route key.
    pub async fn has_route_access(&self, user_id: &str, route_id: &str) -> AppResult<bool> {
        self.check(user_id, |permissions| permissions.has_route_access(route_id))
            .await
    }

    /// Returns whether the user's role grants the UI element.
    pub async fn has_ui_element_access(&self, user_id: &str, element_id: &str) -> AppResult<bool> {
        self.check(user_id, |permissions| {
            permissions.has_ui_element_access(element_id)
        })
        .await
    }

    /// Returns whether the user's role grants the functionality.
    pub async fn has_functionality_access(
        &self,
        user_id: &str,
        functionality_id: &str,
    ) -> AppResult<bool> {
        self.check(user_id, |permissions| {
            permissions.has_functionality_access(functionality_id)
        })
        .await
    }

    /// Legacy authority check across modules, routes and functionality.
    pub async fn has_authority<S>(&self, user_id: &str, authority: &[S]) -> AppResult<bool>
    where
        S: AsRef<str> + Sync,
    {
        self.check(user_id, |permissions| permissions.has_authority(authority))
            .await
    }

    /// Returns whether the route and each of its dotted ancestors are granted.
    pub async fn has_route_path_access(&self, user_id: &str, route_id: &str) -> AppResult<bool> {
        self.check(user_id, |permissions| {
            permissions.has_route_path_access(route_id)
        })
        .await
    }

    /// Evaluates a guard for the user.
    ///
    /// A guard without criteria grants access even for unknown users.
    pub async fn evaluate(&self, user_id: &str, criteria: &AccessCriteria) -> AppResult<bool> {
        if criteria.is_empty() {
            return Ok(true);
        }

        self.check(user_id, |permissions| permissions.evaluate(criteria))
            .await
    }

    /// Returns catalogue entries visible to the user, hiding children of hidden parents.
    pub async fn visible_ui_elements(
        &self,
        user_id: &str,
        catalog: &UiElementCatalog,
    ) -> AppResult<Vec<UiElementDescriptor>> {
        let Some(permissions) = self.user_permissions(user_id).await? else {
            return Ok(Vec::new());
        };

        Ok(catalog
            .visible_to(&permissions)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Filters a module catalogue down to modules granted to the user.
    pub async fn visible_modules(
        &self,
        user_id: &str,
        modules: &[ModuleDescriptor],
    ) -> AppResult<Vec<ModuleDescriptor>> {
        let Some(permissions) = self.user_permissions(user_id).await? else {
            return Ok(Vec::new());
        };

        Ok(modules
            .iter()
            .filter(|module| permissions.has_module_access(module.id().as_str()))
            .cloned()
            .collect())
    }

    async fn check<F>(&self, user_id: &str, decide: F) -> AppResult<bool>
    where
        F: FnOnce(&RolePermissions) -> bool,
    {
        Ok(self
            .user_permissions(user_id)
            .await?
            .is_some_and(|permissions| decide(&permissions)))
    }
}

#[cfg(test)]
mod tests;
