use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use permguard_domain::{AccessCriteria, PermissionTier};
use tracing::debug;

use crate::dto::{AccessResponse, EvaluateAccessRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn check_access_handler(
    State(state): State<AppState>,
    Path((user_id, tier, key)): Path<(String, String, String)>,
) -> ApiResult<Json<AccessResponse>> {
    let tier = PermissionTier::from_str(tier.as_str())?;
    let resolver = &state.permission_resolver;
    let user_id = user_id.as_str();
    let key = key.as_str();

    let granted = match tier {
        PermissionTier::Module => resolver.has_module_access(user_id, key).await?,
        PermissionTier::Route => resolver.has_route_access(user_id, key).await?,
        PermissionTier::UiElement => resolver.has_ui_element_access(user_id, key).await?,
        PermissionTier::Functionality => resolver.has_functionality_access(user_id, key).await?,
    };

    debug!(user_id, tier = tier.as_str(), key, granted, "access checked");
    Ok(Json(AccessResponse { granted }))
}

pub async fn evaluate_access_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<EvaluateAccessRequest>,
) -> ApiResult<Json<AccessResponse>> {
    let criteria = AccessCriteria::from(payload);
    let granted = state
        .permission_resolver
        .evaluate(user_id.as_str(), &criteria)
        .await?;

    Ok(Json(AccessResponse { granted }))
}
