use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use permguard_application::{NewUser, UserUpdate};
use permguard_core::AppError;
use permguard_domain::UserStatus;

use crate::dto::{CreateUserRequest, RolePermissionsResponse, UpdateUserRequest, UserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .permission_store
        .get_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let status = payload
        .status
        .as_deref()
        .map(UserStatus::from_str)
        .transpose()?
        .unwrap_or(UserStatus::Active);

    let user = state
        .permission_store
        .create_user(NewUser {
            name: payload.name,
            email: payload.email,
            role: payload.role,
            status,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let status = payload
        .status
        .as_deref()
        .map(UserStatus::from_str)
        .transpose()?;

    let user = state
        .permission_store
        .update_user(
            user_id.as_str(),
            UserUpdate {
                name: payload.name,
                email: payload.email,
                role: payload.role,
                status,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.permission_store.delete_user(user_id.as_str()).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn user_permissions_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<RolePermissionsResponse>> {
    let permissions = state
        .permission_resolver
        .user_permissions(user_id.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))?;

    Ok(Json(RolePermissionsResponse::from(permissions)))
}
