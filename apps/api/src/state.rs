use std::sync::Arc;

use permguard_application::{PermissionResolver, PermissionStore, RouteService};
use permguard_domain::{ModuleDescriptor, UiElementCatalog};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub permission_store: PermissionStore,
    pub permission_resolver: PermissionResolver,
    pub route_service: RouteService,
    pub ui_element_catalog: Arc<UiElementCatalog>,
    pub module_catalog: Arc<Vec<ModuleDescriptor>>,
}
