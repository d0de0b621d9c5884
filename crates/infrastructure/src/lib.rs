//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_permission_snapshot_store;
mod json_file_permission_snapshot_store;
mod postgres_permission_snapshot_store;

pub use in_memory_permission_snapshot_store::InMemoryPermissionSnapshotStore;
pub use json_file_permission_snapshot_store::JsonFilePermissionSnapshotStore;
pub use postgres_permission_snapshot_store::PostgresPermissionSnapshotStore;
