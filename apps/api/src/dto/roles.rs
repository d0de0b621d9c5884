use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a role.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub color_tag: String,
}

/// Incoming payload for role creation. The id is assigned by the store.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default, alias = "color")]
    pub color_tag: String,
}

/// Incoming payload for partial role updates.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-role-request.ts"
)]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "color")]
    pub color_tag: Option<String>,
}
