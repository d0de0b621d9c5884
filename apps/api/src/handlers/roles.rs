use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use permguard_application::{NewRole, RoleUpdate};

use crate::dto::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .permission_store
        .get_roles()
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state
        .permission_store
        .create_role(NewRole {
            name: payload.name,
            color_tag: payload.color_tag,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .permission_store
        .update_role(
            role_id.as_str(),
            RoleUpdate {
                name: payload.name,
                color_tag: payload.color_tag,
            },
        )
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.permission_store.delete_role(role_id.as_str()).await?;

    Ok(StatusCode::NO_CONTENT)
}
