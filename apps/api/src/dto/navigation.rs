use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Route declared by navigation code.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/route-descriptor-payload.ts"
)]
pub struct RouteDescriptorPayload {
    pub key: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub authority: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "unknown")]
    pub meta: Option<Value>,
}

/// Route with its nested children.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/route-node-response.ts"
)]
pub struct RouteNodeResponse {
    #[serde(flatten)]
    pub route: RouteDescriptorPayload,
    pub children: Vec<RouteNodeResponse>,
}

/// Flat route list submitted for filtering or tree building.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/routes-request.ts"
)]
pub struct RoutesRequest {
    pub routes: Vec<RouteDescriptorPayload>,
}
