use permguard_core::AppResult;
use serde::{Deserialize, Serialize};

use crate::{GrantMap, PermissionTier, RoleId, dotted_path};

/// Grant maps for every tier, owned by one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissions {
    role_id: RoleId,
    #[serde(default)]
    modules: GrantMap,
    #[serde(default)]
    routes: GrantMap,
    #[serde(default)]
    ui_elements: GrantMap,
    #[serde(default)]
    functionality: GrantMap,
}

impl RolePermissions {
    /// Creates a permission record from explicit tier maps.
    #[must_use]
    pub fn new(
        role_id: RoleId,
        modules: GrantMap,
        routes: GrantMap,
        ui_elements: GrantMap,
        functionality: GrantMap,
    ) -> Self {
        Self {
            role_id,
            modules,
            routes,
            ui_elements,
            functionality,
        }
    }

    /// Creates a record that denies everything.
    #[must_use]
    pub fn empty(role_id: RoleId) -> Self {
        Self::new(
            role_id,
            GrantMap::new(),
            GrantMap::new(),
            GrantMap::new(),
            GrantMap::new(),
        )
    }

    /// Returns the owning role.
    #[must_use]
    pub fn role_id(&self) -> &RoleId {
        &self.role_id
    }

    /// Returns module grants.
    #[must_use]
    pub fn modules(&self) -> &GrantMap {
        &self.modules
    }

    /// Returns route grants.
    #[must_use]
    pub fn routes(&self) -> &GrantMap {
        &self.routes
    }

    /// Returns UI element grants.
    #[must_use]
    pub fn ui_elements(&self) -> &GrantMap {
        &self.ui_elements
    }

    /// Returns functionality grants.
    #[must_use]
    pub fn functionality(&self) -> &GrantMap {
        &self.functionality
    }

    /// Returns the grant map for one tier.
    #[must_use]
    pub fn tier(&self, tier: PermissionTier) -> &GrantMap {
        match tier {
            PermissionTier::Module => &self.modules,
            PermissionTier::Route => &self.routes,
            PermissionTier::UiElement => &self.ui_elements,
            PermissionTier::Functionality => &self.functionality,
        }
    }

    /// Point lookup in one tier. Parent keys are not consulted.
    #[must_use]
    pub fn is_granted(&self, tier: PermissionTier, key: &str) -> bool {
        self.tier(tier).is_granted(key)
    }

    /// Returns whether the module is granted.
    #[must_use]
    pub fn has_module_access(&self, module_id: &str) -> bool {
        self.modules.is_granted(module_id)
    }

    /// Returns whether the route key is granted.
    #[must_use]
    pub fn has_route_access(&self, route_id: &str) -> bool {
        self.routes.is_granted(route_id)
    }

    /// Returns whether the UI element is granted.
    #[must_use]
    pub fn has_ui_element_access(&self, element_id: &str) -> bool {
        self.ui_elements.is_granted(element_id)
    }

    /// Returns whether the functionality is granted.
    #[must_use]
    pub fn has_functionality_access(&self, functionality_id: &str) -> bool {
        self.functionality.is_granted(functionality_id)
    }

    /// Legacy authority check: any entry granted in modules, routes or functionality.
    ///
    /// An empty list grants nothing.
    #[must_use]
    pub fn has_authority<S: AsRef<str>>(&self, authority: &[S]) -> bool {
        authority.iter().any(|value| {
            let value = value.as_ref();
            self.modules.is_granted(value)
                || self.routes.is_granted(value)
                || self.functionality.is_granted(value)
        })
    }

    /// Grants a dotted route only when the route and every ancestor prefix are granted.
    #[must_use]
    pub fn has_route_path_access(&self, route_id: &str) -> bool {
        !route_id.is_empty() && dotted_path(route_id).all(|prefix| self.routes.is_granted(prefix))
    }

    /// Evaluates a guard: the AND of every criterion that is specified.
    ///
    /// A guard without criteria grants access.
    #[must_use]
    pub fn evaluate(&self, criteria: &AccessCriteria) -> bool {
        let mut has_access = true;

        if !criteria.authority.is_empty() {
            has_access = has_access && self.has_authority(criteria.authority.as_slice());
        }
        if let Some(module_id) = specified(&criteria.module_id) {
            has_access = has_access && self.has_module_access(module_id);
        }
        if let Some(route_id) = specified(&criteria.route_id) {
            has_access = has_access && self.has_route_access(route_id);
        }
        if let Some(functionality_id) = specified(&criteria.functionality_id) {
            has_access = has_access && self.has_functionality_access(functionality_id);
        }
        if let Some(element_id) = specified(&criteria.ui_element_id) {
            has_access = has_access && self.has_ui_element_access(element_id);
        }

        has_access
    }

    /// Merges a validated patch into this record.
    pub fn apply(&mut self, patch: &RolePermissionsPatch) {
        if let Some(modules) = &patch.modules {
            self.modules.merge(modules);
        }
        if let Some(routes) = &patch.routes {
            self.routes.merge(routes);
        }
        if let Some(ui_elements) = &patch.ui_elements {
            self.ui_elements.merge(ui_elements);
        }
        if let Some(functionality) = &patch.functionality {
            self.functionality.merge(functionality);
        }
    }
}

/// Partial update of a role's grant maps. Absent tiers are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissionsPatch {
    /// Module grants to overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<GrantMap>,
    /// Route grants to overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<GrantMap>,
    /// UI element grants to overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_elements: Option<GrantMap>,
    /// Functionality grants to overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functionality: Option<GrantMap>,
}

impl RolePermissionsPatch {
    /// Creates a patch touching one key of one tier.
    #[must_use]
    pub fn single(tier: PermissionTier, key: impl Into<String>, granted: bool) -> Self {
        let grants = GrantMap::from_iter([(key.into(), granted)]);
        let mut patch = Self::default();
        match tier {
            PermissionTier::Module => patch.modules = Some(grants),
            PermissionTier::Route => patch.routes = Some(grants),
            PermissionTier::UiElement => patch.ui_elements = Some(grants),
            PermissionTier::Functionality => patch.functionality = Some(grants),
        }
        patch
    }

    /// Validates every key in every present tier.
    pub fn validate(&self) -> AppResult<()> {
        [
            &self.modules,
            &self.routes,
            &self.ui_elements,
            &self.functionality,
        ]
        .into_iter()
        .flatten()
        .try_for_each(GrantMap::validate)
    }

    /// Returns whether the patch touches no tier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_none()
            && self.routes.is_none()
            && self.ui_elements.is_none()
            && self.functionality.is_none()
    }
}

/// Criteria of a route or component guard. Unset criteria are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCriteria {
    /// Legacy authority strings; any one granted satisfies the criterion.
    #[serde(default)]
    pub authority: Vec<String>,
    /// Required module.
    #[serde(default)]
    pub module_id: Option<String>,
    /// Required route key.
    #[serde(default)]
    pub route_id: Option<String>,
    /// Required functionality key.
    #[serde(default)]
    pub functionality_id: Option<String>,
    /// Required UI element key.
    #[serde(default)]
    pub ui_element_id: Option<String>,
}

impl AccessCriteria {
    /// Returns whether no criterion is specified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authority.is_empty()
            && specified(&self.module_id).is_none()
            && specified(&self.route_id).is_none()
            && specified(&self.functionality_id).is_none()
            && specified(&self.ui_element_id).is_none()
    }
}

fn specified(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
