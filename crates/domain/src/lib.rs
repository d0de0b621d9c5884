//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod grant;
mod permissions;
mod role;
mod route;
mod state;
mod ui_element;
mod user;

pub use grant::{GrantMap, PermissionTier, dotted_path, validate_grant_key};
pub use permissions::{AccessCriteria, RolePermissions, RolePermissionsPatch};
pub use role::{FALLBACK_ROLE_ID, Role, RoleId, SUPERADMIN_ROLE_ID};
pub use route::{MAX_ROUTE_DEPTH, RouteDescriptor, RouteNode, build_route_hierarchy};
pub use state::{CURRENT_SCHEMA_VERSION, PermissionState};
pub use ui_element::{ModuleDescriptor, UiElementCatalog, UiElementDescriptor, UiElementKind};
pub use user::{EmailAddress, User, UserId, UserStatus};
