//! Built-in roles, users, grants and reference catalogues used to seed an
//! empty permission store.

use permguard_core::AppResult;
use permguard_domain::{
    GrantMap, ModuleDescriptor, PermissionState, Role, RoleId, RolePermissions, User, UserId,
    UserStatus,
};

mod ui_elements;

pub use ui_elements::default_ui_element_catalog;

/// Storage identifier of the permission document.
pub const DEFAULT_STORAGE_KEY: &str = "permission_system_data";

const MODULE_KEYS: [&str; 12] = [
    "dashboard",
    "energy-management",
    "maintenance",
    "analytics",
    "alarms",
    "data-io",
    "building-trend",
    "prediction",
    "summary",
    "dashboard-settings",
    "settings",
    "role-management",
];

const MODULE_NAMES: [&str; 12] = [
    "Dashboard",
    "Energy Management",
    "Maintenance",
    "Analytics",
    "Alarms",
    "Data IO",
    "Building Trend",
    "Prediction",
    "Summary",
    "Dashboard Settings",
    "Settings",
    "Role Management",
];

const ROUTE_KEYS: [&str; 22] = [
    "dashboard",
    "dashboard.esg-overview",
    "dashboard.control-status",
    "dashboard.equipment-status",
    "dashboard.equipment-scheduling",
    "dashboard-settings",
    "dashboard-settings.bot-control",
    "dashboard-settings.bot-control.configuration",
    "dashboard-settings.bot-control.monitoring",
    "dashboard-settings.backend-controls",
    "dashboard-settings.backend-controls.bacnet-engine",
    "dashboard-settings.backend-controls.tags",
    "dashboard-settings.backend-controls.tags.equipment",
    "dashboard-settings.backend-controls.tags.area",
    "dashboard-settings.backend-controls.tags.datapoint",
    "dashboard-settings.backend-controls.services-monitoring",
    "energy-management",
    "energy-management.dashboard",
    "settings",
    "settings.general",
    "settings.security",
    "settings.role-management",
];

const UI_ELEMENT_KEYS: [&str; 20] = [
    "dashboard-settings.bot-control.config-modal",
    "dashboard-settings.bot-control.monitoring-toggle",
    "dashboard-settings.bot-control.advanced-settings",
    "dashboard-settings.backend-controls.bacnet-engine.device-modal",
    "dashboard-settings.backend-controls.bacnet-engine.bulk-actions",
    "dashboard-settings.backend-controls.tags.equipment-tab",
    "dashboard-settings.backend-controls.tags.area-tab",
    "dashboard-settings.backend-controls.tags.datapoint-tab",
    "dashboard-settings.backend-controls.tags.create-tag-modal",
    "dashboard-settings.backend-controls.tags.import-export-toggle",
    "dashboard-settings.backend-controls.services-monitoring.status-modal",
    "dashboard-settings.backend-controls.services-monitoring.restart-action",
    "energy-management.dashboard.chart-toggle",
    "energy-management.dashboard.export-modal",
    "energy-management.dashboard.real-time-toggle",
    "energy-management.dashboard.advanced-filters",
    "settings.general.theme-toggle",
    "settings.general.backup-modal",
    "settings.security.2fa-toggle",
    "settings.security.password-modal",
];

const FUNCTIONALITY_KEYS: [&str; 18] = [
    "btn.create",
    "btn.edit",
    "btn.delete",
    "btn.save",
    "btn.export",
    "btn.import",
    "btn.configure",
    "field.equipment-name",
    "field.tag-01",
    "field.tag-02",
    "view.table",
    "view.details",
    "view.charts",
    "action.filter",
    "action.search",
    "action.create-role",
    "action.edit-role",
    "action.delete-role",
];

const T: bool = true;
const F: bool = false;

struct RoleSeed {
    id: &'static str,
    name: &'static str,
    color_tag: &'static str,
    modules: [bool; 12],
    routes: [bool; 22],
    ui_elements: [bool; 20],
    functionality: [bool; 18],
}

const ROLE_SEEDS: [RoleSeed; 5] = [
    RoleSeed {
        id: "superadmin",
        name: "Super Administrator",
        color_tag: "bg-purple-100 text-purple-800 border-purple-200",
        modules: [T; 12],
        routes: [T; 22],
        ui_elements: [T; 20],
        functionality: [T; 18],
    },
    RoleSeed {
        id: "admin",
        name: "Administrator",
        color_tag: "bg-red-100 text-red-800 border-red-200",
        modules: [T, T, T, T, T, T, T, T, T, T, T, F],
        routes: [
            T, T, T, T, T, T, T, T, T, T, T, T, T, T, T, T, T, T, T, T, T, F,
        ],
        ui_elements: [T; 20],
        functionality: [
            T, T, T, T, T, T, T, T, T, T, T, T, T, T, T, F, F, F,
        ],
    },
    RoleSeed {
        id: "manager",
        name: "Manager",
        color_tag: "bg-blue-100 text-blue-800 border-blue-200",
        modules: [T, T, T, T, T, F, T, F, T, T, F, F],
        routes: [
            T, T, T, T, T, T, T, T, F, T, F, T, T, F, F, T, T, T, F, F, F, F,
        ],
        ui_elements: [
            T, T, F, F, F, T, F, F, T, F, T, F, T, T, T, F, F, F, F, F,
        ],
        functionality: [
            T, T, F, T, T, F, F, T, T, F, T, T, T, T, T, F, F, F,
        ],
    },
    RoleSeed {
        id: "operator",
        name: "Operator",
        color_tag: "bg-green-100 text-green-800 border-green-200",
        modules: [F, T, T, F, T, F, F, F, T, F, F, F],
        routes: [
            F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, T, T, F, F, F, F,
        ],
        ui_elements: [
            F, F, F, F, F, F, F, F, F, F, F, F, T, F, T, F, F, F, F, F,
        ],
        functionality: [
            F, T, F, T, F, F, F, T, T, F, T, F, F, T, T, F, F, F,
        ],
    },
    RoleSeed {
        id: "viewer",
        name: "Viewer",
        color_tag: "bg-gray-100 text-gray-800 border-gray-200",
        modules: [F, T, F, F, T, F, F, F, T, F, F, F],
        routes: [
            F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, F, T, T, F, F, F, F,
        ],
        ui_elements: [
            F, F, F, F, F, F, F, F, F, F, F, F, T, F, F, F, F, F, F, F,
        ],
        functionality: [
            F, F, F, F, F, F, F, F, F, F, T, T, F, T, T, F, F, F,
        ],
    },
];

const USER_SEEDS: [(&str, &str, &str, &str); 5] = [
    ("0", "Super Admin", "superadmin@example.com", "superadmin"),
    ("1", "John Doe", "john@example.com", "admin"),
    ("2", "Jane Smith", "jane@example.com", "manager"),
    ("3", "Bob Johnson", "bob@example.com", "operator"),
    ("4", "Alice Brown", "alice@example.com", "viewer"),
];

fn grant_map<const N: usize>(keys: &[&str; N], grants: &[bool; N]) -> GrantMap {
    keys.iter()
        .zip(grants.iter())
        .map(|(key, granted)| (*key, *granted))
        .collect()
}

/// Builds the state written on first access to an empty store.
pub fn default_permission_state() -> AppResult<PermissionState> {
    let mut roles = Vec::with_capacity(ROLE_SEEDS.len());
    let mut permissions = Vec::with_capacity(ROLE_SEEDS.len());

    for seed in &ROLE_SEEDS {
        let role_id = RoleId::new(seed.id)?;
        permissions.push(RolePermissions::new(
            role_id.clone(),
            grant_map(&MODULE_KEYS, &seed.modules),
            grant_map(&ROUTE_KEYS, &seed.routes),
            grant_map(&UI_ELEMENT_KEYS, &seed.ui_elements),
            grant_map(&FUNCTIONALITY_KEYS, &seed.functionality),
        ));
        roles.push(Role::new(role_id, seed.name, seed.color_tag)?);
    }

    let users = USER_SEEDS
        .iter()
        .map(|(id, name, email, role)| {
            User::new(
                UserId::new(*id)?,
                *name,
                *email,
                RoleId::new(*role)?,
                UserStatus::Active,
            )
        })
        .collect::<AppResult<Vec<_>>>()?;

    PermissionState::new(users, roles, permissions)
}

/// Returns the sidebar module catalogue.
pub fn default_module_catalog() -> AppResult<Vec<ModuleDescriptor>> {
    MODULE_KEYS
        .iter()
        .zip(MODULE_NAMES.iter())
        .map(|(id, name)| ModuleDescriptor::new(*id, *name))
        .collect()
}
