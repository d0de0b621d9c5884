//! Application services and ports.

#![forbid(unsafe_code)]

pub mod permission_defaults;
mod permission_resolver;
mod permission_store;
mod route_service;
mod snapshot_ports;

pub use permission_resolver::PermissionResolver;
pub use permission_store::{NewRole, NewUser, PermissionStore, RoleUpdate, UserUpdate};
pub use route_service::RouteService;
pub use snapshot_ports::{PermissionSnapshotStore, VersionedSnapshot};
