use std::sync::Arc;

use async_trait::async_trait;
use permguard_core::{AppError, AppResult};
use permguard_domain::{AccessCriteria, PermissionState};
use tokio::sync::Mutex;

use crate::permission_defaults::{default_module_catalog, default_ui_element_catalog};
use crate::{PermissionSnapshotStore, PermissionStore, VersionedSnapshot};

use super::PermissionResolver;

#[derive(Default)]
struct FakeSnapshotStore {
    snapshot: Mutex<Option<VersionedSnapshot>>,
}

#[async_trait]
impl PermissionSnapshotStore for FakeSnapshotStore {
    async fn load(&self) -> AppResult<Option<VersionedSnapshot>> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save(
        &self,
        state: &PermissionState,
        _expected_revision: Option<u64>,
    ) -> AppResult<u64> {
        let mut snapshot = self.snapshot.lock().await;
        let revision = snapshot.as_ref().map_or(1, |snapshot| snapshot.revision + 1);
        *snapshot = Some(VersionedSnapshot {
            revision,
            state: state.clone(),
        });
        Ok(revision)
    }
}

struct FailingSnapshotStore;

#[async_trait]
impl PermissionSnapshotStore for FailingSnapshotStore {
    async fn load(&self) -> AppResult<Option<VersionedSnapshot>> {
        Err(AppError::Internal("disk unavailable".to_owned()))
    }

    async fn save(
        &self,
        _state: &PermissionState,
        _expected_revision: Option<u64>,
    ) -> AppResult<u64> {
        Err(AppError::Internal("disk unavailable".to_owned()))
    }
}

fn resolver() -> PermissionResolver {
    PermissionResolver::new(PermissionStore::new(Arc::new(
        FakeSnapshotStore::default(),
    )))
}

#[tokio::test]
async fn point_lookups_follow_seeded_grants() {
    let resolver = resolver();

    assert!(matches!(resolver.has_module_access("2", "analytics").await, Ok(true)));
    assert!(matches!(resolver.has_module_access("3", "analytics").await, Ok(false)));
    assert!(matches!(
        resolver.has_route_access("2", "dashboard-settings.bot-control").await,
        Ok(true)
    ));
    assert!(matches!(
        resolver
            .has_ui_element_access("4", "energy-management.dashboard.chart-toggle")
            .await,
        Ok(true)
    ));
    assert!(matches!(
        resolver.has_functionality_access("4", "btn.create").await,
        Ok(false)
    ));
}

#[tokio::test]
async fn unknown_user_is_denied_everything() {
    let resolver = resolver();

    assert!(matches!(resolver.user_permissions("99").await, Ok(None)));
    assert!(matches!(resolver.has_module_access("99", "alarms").await, Ok(false)));
    assert!(matches!(resolver.has_authority("99", &["alarms"]).await, Ok(false)));
    assert!(matches!(
        resolver.visible_ui_elements("99", &default_catalog()).await,
        Ok(elements) if elements.is_empty()
    ));
}

#[tokio::test]
async fn absent_keys_are_denied() {
    let resolver = resolver();

    assert!(matches!(resolver.has_module_access("0", "no-such-module").await, Ok(false)));
    assert!(matches!(resolver.has_route_access("0", "no.such.route").await, Ok(false)));
    assert!(matches!(
        resolver.has_functionality_access("0", "btn.launch").await,
        Ok(false)
    ));
}

#[tokio::test]
async fn authority_with_empty_list_is_denied() {
    let resolver = resolver();

    assert!(matches!(resolver.has_authority::<&str>("0", &[]).await, Ok(false)));
    assert!(matches!(
        resolver.has_authority("4", &["btn.delete", "view.table"]).await,
        Ok(true)
    ));
}

#[tokio::test]
async fn guard_combines_criteria_with_and() {
    let resolver = resolver();
    let criteria = AccessCriteria {
        module_id: Some("alarms".to_owned()),
        functionality_id: Some("btn.create".to_owned()),
        ..AccessCriteria::default()
    };

    assert!(matches!(resolver.evaluate("2", &criteria).await, Ok(true)));
    assert!(matches!(resolver.evaluate("4", &criteria).await, Ok(false)));
    assert!(matches!(
        resolver.evaluate("99", &AccessCriteria::default()).await,
        Ok(true)
    ));
}

#[tokio::test]
async fn role_resolution_falls_back_to_all_deny() {
    let resolver = resolver();

    let Ok(admin) = resolver.for_role("admin").await else {
        panic!("admin must resolve");
    };
    assert!(admin.has_module_access("settings"));

    let Ok(unknown) = resolver.for_role("auditor").await else {
        panic!("unknown role must resolve");
    };
    assert_eq!(unknown.role_id().as_str(), "auditor");
    assert!(unknown.modules().is_empty());
}

#[tokio::test]
async fn user_whose_role_has_no_record_gets_all_deny() {
    let resolver = resolver();
    let Ok(state) = resolver.store().load().await else {
        panic!("load must succeed");
    };
    let Ok(mut raw) = serde_json::to_value(&state) else {
        panic!("state must serialize");
    };
    if let Some(permissions) = raw["permissions"].as_object_mut() {
        permissions.remove("admin");
    }
    let Ok(state) = serde_json::from_value::<PermissionState>(raw) else {
        panic!("state must deserialize");
    };
    assert!(resolver.store().save(state).await.is_ok());

    let resolved = resolver.user_permissions("1").await;

    assert!(matches!(
        resolved,
        Ok(Some(permissions)) if permissions.role_id().as_str() == "admin"
            && permissions.modules().is_empty()
    ));
}

#[tokio::test]
async fn route_path_access_requires_granted_ancestors() {
    let resolver = resolver();

    assert!(matches!(
        resolver
            .has_route_path_access("2", "dashboard-settings.backend-controls.tags.equipment")
            .await,
        Ok(true)
    ));
    assert!(matches!(
        resolver
            .has_route_path_access("2", "dashboard-settings.backend-controls.bacnet-engine")
            .await,
        Ok(false)
    ));
}

#[tokio::test]
async fn viewer_sees_only_energy_dashboard_branch() {
    let resolver = resolver();

    let Ok(visible) = resolver.visible_ui_elements("4", &default_catalog()).await else {
        panic!("visible elements must resolve");
    };
    let ids: Vec<&str> = visible.iter().map(|element| element.id().as_str()).collect();

    assert_eq!(
        ids,
        vec![
            "energy-management",
            "energy-management.dashboard",
            "energy-management.dashboard.chart-toggle",
        ]
    );
}

#[tokio::test]
async fn visible_modules_keep_catalogue_order() {
    let resolver = resolver();
    let Ok(modules) = default_module_catalog() else {
        panic!("module catalogue must be valid");
    };

    let Ok(visible) = resolver.visible_modules("4", &modules).await else {
        panic!("visible modules must resolve");
    };
    let ids: Vec<&str> = visible.iter().map(|module| module.id().as_str()).collect();

    assert_eq!(ids, vec!["energy-management", "alarms", "summary"]);
}

#[tokio::test]
async fn backend_failures_propagate() {
    let resolver = PermissionResolver::new(PermissionStore::new(Arc::new(FailingSnapshotStore)));

    assert!(matches!(
        resolver.has_module_access("0", "alarms").await,
        Err(AppError::Internal(_))
    ));
}

fn default_catalog() -> permguard_domain::UiElementCatalog {
    match default_ui_element_catalog() {
        Ok(catalog) => catalog,
        Err(error) => panic!("default catalogue must be valid: {error}"),
    }
}
