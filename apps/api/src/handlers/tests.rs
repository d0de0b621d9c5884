use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use permguard_infrastructure::InMemoryPermissionSnapshotStore;

use crate::api_services::app_state_from_snapshots;
use crate::dto::{
    CreateRoleRequest, CreateUserRequest, EvaluateAccessRequest, RouteDescriptorPayload,
    RoutesRequest, UpdateRolePermissionsRequest, UpdateUserRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

use super::{access, catalog, navigation, permissions, roles, users};

fn app_state() -> AppState {
    let Ok(state) = app_state_from_snapshots(Arc::new(InMemoryPermissionSnapshotStore::new()))
    else {
        panic!("app state must build");
    };
    state
}

fn status_of(error: ApiError) -> StatusCode {
    error.into_response().status()
}

fn route(key: &str, parent: Option<&str>) -> RouteDescriptorPayload {
    RouteDescriptorPayload {
        key: key.to_owned(),
        path: format!("/{}", key.replace('.', "/")),
        authority: Vec::new(),
        module_id: None,
        parent_route: parent.map(str::to_owned),
        level: None,
        meta: None,
    }
}

#[tokio::test]
async fn user_lifecycle_over_handlers() {
    let state = app_state();

    let created = users::create_user_handler(
        State(state.clone()),
        Json(CreateUserRequest {
            name: "Carol White".to_owned(),
            email: "carol@example.com".to_owned(),
            role: "operator".to_owned(),
            status: None,
        }),
    )
    .await;
    let Ok((status, Json(user))) = created else {
        panic!("user must be created");
    };
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user.status, "active");

    let updated = users::update_user_handler(
        State(state.clone()),
        Path(user.id.clone()),
        Json(UpdateUserRequest {
            status: Some("inactive".to_owned()),
            ..UpdateUserRequest::default()
        }),
    )
    .await;
    assert!(matches!(updated, Ok(Json(user)) if user.status == "inactive" && user.role == "operator"));

    let Ok(Json(listed)) = users::list_users_handler(State(state.clone())).await else {
        panic!("users must list");
    };
    assert!(listed.iter().any(|listed_user| listed_user.id == user.id));

    let deleted = users::delete_user_handler(State(state.clone()), Path(user.id.clone())).await;
    assert!(matches!(deleted, Ok(StatusCode::NO_CONTENT)));

    let Err(error) = users::delete_user_handler(State(state), Path(user.id)).await else {
        panic!("second delete must fail");
    };
    assert_eq!(status_of(error), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_user_payloads_are_bad_requests() {
    let state = app_state();

    let Err(unknown_role) = users::create_user_handler(
        State(state.clone()),
        Json(CreateUserRequest {
            name: "Dan".to_owned(),
            email: "dan@example.com".to_owned(),
            role: "ghost".to_owned(),
            status: None,
        }),
    )
    .await
    else {
        panic!("unknown role must be rejected");
    };
    assert_eq!(status_of(unknown_role), StatusCode::BAD_REQUEST);

    let Err(bad_status) = users::update_user_handler(
        State(state),
        Path("4".to_owned()),
        Json(UpdateUserRequest {
            status: Some("suspended".to_owned()),
            ..UpdateUserRequest::default()
        }),
    )
    .await
    else {
        panic!("unknown status must be rejected");
    };
    assert_eq!(status_of(bad_status), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn superadmin_role_cannot_be_deleted() {
    let state = app_state();

    let Err(error) =
        roles::delete_role_handler(State(state.clone()), Path("superadmin".to_owned())).await
    else {
        panic!("superadmin deletion must fail");
    };
    assert_eq!(status_of(error), StatusCode::FORBIDDEN);

    let Ok(Json(listed)) = roles::list_roles_handler(State(state)).await else {
        panic!("roles must list");
    };
    assert!(listed.iter().any(|role| role.id == "superadmin"));
}

#[tokio::test]
async fn deleting_a_role_moves_its_users_to_viewer() {
    let state = app_state();

    let deleted =
        roles::delete_role_handler(State(state.clone()), Path("operator".to_owned())).await;
    assert!(matches!(deleted, Ok(StatusCode::NO_CONTENT)));

    let Ok(Json(listed)) = users::list_users_handler(State(state.clone())).await else {
        panic!("users must list");
    };
    assert!(matches!(
        listed.iter().find(|user| user.id == "3"),
        Some(user) if user.role == "viewer"
    ));

    let Err(error) =
        permissions::role_permissions_handler(State(state), Path("operator".to_owned())).await
    else {
        panic!("deleted role must have no record");
    };
    assert_eq!(status_of(error), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn created_role_starts_with_empty_grants() {
    let state = app_state();

    let Ok((status, Json(role))) = roles::create_role_handler(
        State(state.clone()),
        Json(CreateRoleRequest {
            name: "Auditor".to_owned(),
            color_tag: "bg-gray-100".to_owned(),
        }),
    )
    .await
    else {
        panic!("role must be created");
    };
    assert_eq!(status, StatusCode::CREATED);

    let record = permissions::role_permissions_handler(State(state), Path(role.id.clone())).await;
    assert!(matches!(
        record,
        Ok(Json(record)) if record.role_id == role.id
            && record.modules.is_empty()
            && record.functionality.is_empty()
    ));
}

#[tokio::test]
async fn viewer_gains_create_button_without_losing_other_grants() {
    let state = app_state();
    let check = |key: &str| {
        access::check_access_handler(
            State(state.clone()),
            Path(("4".to_owned(), "functionality".to_owned(), key.to_owned())),
        )
    };

    assert!(matches!(check("btn.create").await, Ok(Json(response)) if !response.granted));

    let Ok(Json(before)) =
        permissions::role_permissions_handler(State(state.clone()), Path("viewer".to_owned()))
            .await
    else {
        panic!("viewer record must exist");
    };

    let updated = permissions::update_role_permissions_handler(
        State(state.clone()),
        Path("viewer".to_owned()),
        Json(UpdateRolePermissionsRequest {
            functionality: Some(BTreeMap::from([("btn.create".to_owned(), true)])),
            ..UpdateRolePermissionsRequest::default()
        }),
    )
    .await;
    let Ok(Json(after)) = updated else {
        panic!("viewer record must update");
    };

    assert!(matches!(check("btn.create").await, Ok(Json(response)) if response.granted));
    assert_eq!(after.modules, before.modules);
    assert_eq!(after.routes, before.routes);
    for (key, granted) in &before.functionality {
        if key != "btn.create" {
            assert_eq!(after.functionality.get(key), Some(granted));
        }
    }
}

#[tokio::test]
async fn malformed_grant_keys_are_rejected() {
    let state = app_state();

    let Err(error) = permissions::update_role_permissions_handler(
        State(state),
        Path("viewer".to_owned()),
        Json(UpdateRolePermissionsRequest {
            routes: Some(BTreeMap::from([("settings..general".to_owned(), true)])),
            ..UpdateRolePermissionsRequest::default()
        }),
    )
    .await
    else {
        panic!("malformed key must be rejected");
    };
    assert_eq!(status_of(error), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn access_checks_deny_unknown_users_and_reject_unknown_tiers() {
    let state = app_state();

    let unknown_user = access::check_access_handler(
        State(state.clone()),
        Path(("99".to_owned(), "module".to_owned(), "alarms".to_owned())),
    )
    .await;
    assert!(matches!(unknown_user, Ok(Json(response)) if !response.granted));

    let Err(error) = access::check_access_handler(
        State(state.clone()),
        Path(("4".to_owned(), "widgets".to_owned(), "alarms".to_owned())),
    )
    .await
    else {
        panic!("unknown tier must be rejected");
    };
    assert_eq!(status_of(error), StatusCode::BAD_REQUEST);

    let Err(error) =
        users::user_permissions_handler(State(state), Path("99".to_owned())).await
    else {
        panic!("unknown user must have no permissions");
    };
    assert_eq!(status_of(error), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_guard_grants_access_to_anyone() {
    let state = app_state();

    let evaluated = access::evaluate_access_handler(
        State(state.clone()),
        Path("99".to_owned()),
        Json(EvaluateAccessRequest::default()),
    )
    .await;
    assert!(matches!(evaluated, Ok(Json(response)) if response.granted));

    let guarded = access::evaluate_access_handler(
        State(state),
        Path("99".to_owned()),
        Json(EvaluateAccessRequest {
            module_id: Some("alarms".to_owned()),
            ..EvaluateAccessRequest::default()
        }),
    )
    .await;
    assert!(matches!(guarded, Ok(Json(response)) if !response.granted));
}

#[tokio::test]
async fn hierarchy_handler_drops_orphans() {
    let state = app_state();

    let Ok(Json(tree)) = navigation::route_hierarchy_handler(
        State(state),
        Json(RoutesRequest {
            routes: vec![
                route("a", None),
                route("a.b", Some("a")),
                route("x.y", Some("x")),
            ],
        }),
    )
    .await
    else {
        panic!("hierarchy must build");
    };

    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].route.key, "a");
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(tree[0].children[0].route.key, "a.b");
}

#[tokio::test]
async fn deeply_nested_routes_are_a_bad_request() {
    let state = app_state();
    let routes = (0..10_000)
        .map(|index| {
            let parent = (index > 0).then(|| format!("r{}", index - 1));
            route(format!("r{index}").as_str(), parent.as_deref())
        })
        .collect();

    let Err(error) =
        navigation::route_hierarchy_handler(State(state), Json(RoutesRequest { routes })).await
    else {
        panic!("deep chain must be rejected");
    };
    assert_eq!(status_of(error), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn filter_handler_returns_empty_list_for_unknown_user() {
    let state = app_state();

    let filtered = navigation::filter_routes_handler(
        State(state),
        Path("99".to_owned()),
        Json(RoutesRequest {
            routes: vec![route("energy-management", None)],
        }),
    )
    .await;

    assert!(matches!(filtered, Ok(Json(routes)) if routes.is_empty()));
}

#[tokio::test]
async fn visible_modules_are_a_subset_of_the_catalogue() {
    let state = app_state();

    let Json(all_modules) = catalog::modules_handler(State(state.clone())).await;
    let Ok(Json(superadmin_modules)) =
        catalog::visible_modules_handler(State(state.clone()), Path("0".to_owned())).await
    else {
        panic!("superadmin modules must resolve");
    };
    let Ok(Json(viewer_modules)) =
        catalog::visible_modules_handler(State(state), Path("4".to_owned())).await
    else {
        panic!("viewer modules must resolve");
    };

    assert_eq!(superadmin_modules.len(), all_modules.len());
    assert!(viewer_modules.len() < all_modules.len());
    assert!(
        viewer_modules
            .iter()
            .all(|module| all_modules.iter().any(|known| known.id == module.id))
    );
}

#[tokio::test]
async fn ui_element_catalogue_is_served_with_visibility_filter() {
    let state = app_state();

    let Json(all_elements) = catalog::ui_elements_handler(State(state.clone())).await;
    let Ok(Json(visible)) =
        catalog::visible_ui_elements_handler(State(state), Path("99".to_owned())).await
    else {
        panic!("unknown user must resolve to an empty list");
    };

    assert!(!all_elements.is_empty());
    assert!(visible.is_empty());
}
