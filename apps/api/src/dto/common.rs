use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Result of a single access decision.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/access-response.ts"
)]
pub struct AccessResponse {
    pub granted: bool,
}

/// Combined guard checked against one user.
///
/// Every provided criterion must pass; an empty guard grants access.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/evaluate-access-request.ts"
)]
pub struct EvaluateAccessRequest {
    #[serde(default)]
    pub authority: Vec<String>,
    #[serde(default)]
    pub module_id: Option<String>,
    #[serde(default)]
    pub route_id: Option<String>,
    #[serde(default)]
    pub functionality_id: Option<String>,
    #[serde(default)]
    pub ui_element_id: Option<String>,
}
