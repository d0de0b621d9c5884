use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{ModuleResponse, UiElementResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn ui_elements_handler(State(state): State<AppState>) -> Json<Vec<UiElementResponse>> {
    Json(
        state
            .ui_element_catalog
            .elements()
            .iter()
            .map(UiElementResponse::from)
            .collect(),
    )
}

pub async fn modules_handler(State(state): State<AppState>) -> Json<Vec<ModuleResponse>> {
    Json(
        state
            .module_catalog
            .iter()
            .map(ModuleResponse::from)
            .collect(),
    )
}

pub async fn visible_ui_elements_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<UiElementResponse>>> {
    let elements = state
        .permission_resolver
        .visible_ui_elements(user_id.as_str(), &state.ui_element_catalog)
        .await?;

    Ok(Json(elements.iter().map(UiElementResponse::from).collect()))
}

pub async fn visible_modules_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<ModuleResponse>>> {
    let modules = state
        .permission_resolver
        .visible_modules(user_id.as_str(), &state.module_catalog)
        .await?;

    Ok(Json(modules.iter().map(ModuleResponse::from).collect()))
}
