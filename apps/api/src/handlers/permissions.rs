use axum::Json;
use axum::extract::{Path, State};
use permguard_core::AppError;
use permguard_domain::RolePermissionsPatch;

use crate::dto::{RolePermissionsResponse, UpdateRolePermissionsRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_permissions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RolePermissionsResponse>>> {
    let permissions = state
        .permission_store
        .get_all_permissions()
        .await?
        .into_iter()
        .map(RolePermissionsResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn role_permissions_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<Json<RolePermissionsResponse>> {
    let permissions = state
        .permission_store
        .get_role_permissions(role_id.as_str())
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("role '{role_id}' has no permission record"))
        })?;

    Ok(Json(RolePermissionsResponse::from(permissions)))
}

pub async fn update_role_permissions_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
    Json(payload): Json<UpdateRolePermissionsRequest>,
) -> ApiResult<Json<RolePermissionsResponse>> {
    let permissions = state
        .permission_store
        .upsert_role_permissions(role_id.as_str(), RolePermissionsPatch::from(payload))
        .await?;

    Ok(Json(RolePermissionsResponse::from(permissions)))
}
