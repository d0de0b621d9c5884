use permguard_core::AppResult;
use permguard_domain::{UiElementCatalog, UiElementDescriptor, UiElementKind};

use permguard_domain::UiElementKind::{Action, Component, Conditional, Modal, Route, Toggle};

/// (id, name, kind, parent id, level, description)
type ElementSeed = (
    &'static str,
    &'static str,
    UiElementKind,
    Option<&'static str>,
    u32,
    Option<&'static str>,
);

const BOT_CONTROL: &str = "dashboard-settings.bot-control";
const BACKEND_CONTROLS: &str = "dashboard-settings.backend-controls";
const BACNET_ENGINE: &str = "dashboard-settings.backend-controls.bacnet-engine";
const TAGS: &str = "dashboard-settings.backend-controls.tags";
const SERVICES_MONITORING: &str = "dashboard-settings.backend-controls.services-monitoring";
const ENERGY_DASHBOARD: &str = "energy-management.dashboard";

const ELEMENT_SEEDS: [ElementSeed; 31] = [
    ("dashboard-settings", "Dashboard Settings", Route, None, 0, None),
    (BOT_CONTROL, "Bot Control Tab", Route, Some("dashboard-settings"), 1, None),
    (
        "dashboard-settings.bot-control.config-modal",
        "Configuration Modal",
        Modal,
        Some(BOT_CONTROL),
        2,
        Some("Modal for bot configuration"),
    ),
    (
        "dashboard-settings.bot-control.monitoring-toggle",
        "Monitoring Toggle",
        Toggle,
        Some(BOT_CONTROL),
        2,
        Some("Toggle monitoring on/off"),
    ),
    (
        "dashboard-settings.bot-control.advanced-settings",
        "Advanced Settings Panel",
        Conditional,
        Some(BOT_CONTROL),
        2,
        Some("Conditionally shown advanced panel"),
    ),
    (BACKEND_CONTROLS, "Backend Controls Tab", Route, Some("dashboard-settings"), 1, None),
    (BACNET_ENGINE, "BACnet Engine", Route, Some(BACKEND_CONTROLS), 2, None),
    (
        "dashboard-settings.backend-controls.bacnet-engine.device-modal",
        "Add Device Modal",
        Modal,
        Some(BACNET_ENGINE),
        3,
        Some("Modal to add new BACnet device"),
    ),
    (
        "dashboard-settings.backend-controls.bacnet-engine.bulk-actions",
        "Bulk Device Actions",
        Component,
        Some(BACNET_ENGINE),
        3,
        Some("Bulk operations component"),
    ),
    (TAGS, "Tags Section", Route, Some(BACKEND_CONTROLS), 2, None),
    (
        "dashboard-settings.backend-controls.tags.equipment-tab",
        "Equipment Tag Tab",
        Component,
        Some(TAGS),
        3,
        None,
    ),
    (
        "dashboard-settings.backend-controls.tags.area-tab",
        "Area Tag Tab",
        Component,
        Some(TAGS),
        3,
        None,
    ),
    (
        "dashboard-settings.backend-controls.tags.datapoint-tab",
        "Datapoint Tagging Tab",
        Component,
        Some(TAGS),
        3,
        None,
    ),
    (
        "dashboard-settings.backend-controls.tags.create-tag-modal",
        "Create Tag Modal",
        Modal,
        Some(TAGS),
        3,
        Some("Modal for creating new tags"),
    ),
    (
        "dashboard-settings.backend-controls.tags.import-export-toggle",
        "Import/Export Toggle",
        Toggle,
        Some(TAGS),
        3,
        Some("Toggle import/export functionality"),
    ),
    (
        SERVICES_MONITORING,
        "Services Monitoring",
        Route,
        Some(BACKEND_CONTROLS),
        2,
        None,
    ),
    (
        "dashboard-settings.backend-controls.services-monitoring.status-modal",
        "Service Status Modal",
        Modal,
        Some(SERVICES_MONITORING),
        3,
        Some("Detailed service status modal"),
    ),
    (
        "dashboard-settings.backend-controls.services-monitoring.restart-action",
        "Restart Service Action",
        Action,
        Some(SERVICES_MONITORING),
        3,
        Some("Action to restart services"),
    ),
    ("energy-management", "Energy Management", Route, None, 0, None),
    (ENERGY_DASHBOARD, "Energy Dashboard", Route, Some("energy-management"), 1, None),
    (
        "energy-management.dashboard.chart-toggle",
        "Chart View Toggle",
        Toggle,
        Some(ENERGY_DASHBOARD),
        2,
        Some("Toggle between chart types"),
    ),
    (
        "energy-management.dashboard.export-modal",
        "Export Data Modal",
        Modal,
        Some(ENERGY_DASHBOARD),
        2,
        Some("Modal for data export options"),
    ),
    (
        "energy-management.dashboard.real-time-toggle",
        "Real-time Updates",
        Toggle,
        Some(ENERGY_DASHBOARD),
        2,
        Some("Enable/disable real-time updates"),
    ),
    (
        "energy-management.dashboard.advanced-filters",
        "Advanced Filters Panel",
        Conditional,
        Some(ENERGY_DASHBOARD),
        2,
        Some("Advanced filtering options"),
    ),
    ("settings", "Settings", Route, None, 0, None),
    ("settings.general", "General Settings", Route, Some("settings"), 1, None),
    (
        "settings.general.theme-toggle",
        "Theme Toggle",
        Toggle,
        Some("settings.general"),
        2,
        Some("Dark/Light theme toggle"),
    ),
    (
        "settings.general.backup-modal",
        "Backup Settings Modal",
        Modal,
        Some("settings.general"),
        2,
        Some("Backup configuration modal"),
    ),
    ("settings.security", "Security Settings", Route, Some("settings"), 1, None),
    (
        "settings.security.2fa-toggle",
        "2FA Toggle",
        Toggle,
        Some("settings.security"),
        2,
        Some("Two-factor authentication toggle"),
    ),
    (
        "settings.security.password-modal",
        "Change Password Modal",
        Modal,
        Some("settings.security"),
        2,
        Some("Password change modal"),
    ),
];

/// Returns the catalogue of permission-gated UI elements.
pub fn default_ui_element_catalog() -> AppResult<UiElementCatalog> {
    let elements = ELEMENT_SEEDS
        .iter()
        .map(|(id, name, kind, parent_id, level, description)| {
            UiElementDescriptor::new(
                *id,
                *name,
                *kind,
                parent_id.map(str::to_owned),
                *level,
                description.map(str::to_owned),
            )
        })
        .collect::<AppResult<Vec<_>>>()?;

    UiElementCatalog::new(elements)
}
