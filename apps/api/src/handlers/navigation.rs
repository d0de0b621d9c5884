use axum::Json;
use axum::extract::{Path, State};
use permguard_domain::RouteDescriptor;

use crate::dto::{RouteDescriptorPayload, RouteNodeResponse, RoutesRequest};
use crate::error::ApiResult;
use crate::state::AppState;

fn route_descriptors(payload: RoutesRequest) -> Vec<RouteDescriptor> {
    payload
        .routes
        .into_iter()
        .map(RouteDescriptor::from)
        .collect()
}

pub async fn filter_routes_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<RoutesRequest>,
) -> ApiResult<Json<Vec<RouteDescriptorPayload>>> {
    let routes = route_descriptors(payload);
    let accessible = state
        .route_service
        .filter_routes_by_permission(&routes, user_id.as_str())
        .await?
        .into_iter()
        .map(RouteDescriptorPayload::from)
        .collect();

    Ok(Json(accessible))
}

pub async fn user_navigation_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(payload): Json<RoutesRequest>,
) -> ApiResult<Json<Vec<RouteNodeResponse>>> {
    let routes = route_descriptors(payload);
    let tree = state
        .route_service
        .accessible_navigation(&routes, user_id.as_str())
        .await?
        .into_iter()
        .map(RouteNodeResponse::from)
        .collect();

    Ok(Json(tree))
}

pub async fn route_hierarchy_handler(
    State(state): State<AppState>,
    Json(payload): Json<RoutesRequest>,
) -> ApiResult<Json<Vec<RouteNodeResponse>>> {
    let routes = route_descriptors(payload);
    let tree = state
        .route_service
        .generate_route_hierarchy(&routes)?
        .into_iter()
        .map(RouteNodeResponse::from)
        .collect();

    Ok(Json(tree))
}
