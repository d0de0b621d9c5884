use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Grant maps of one role, keyed by dotted resource key.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-permissions-response.ts"
)]
pub struct RolePermissionsResponse {
    pub role_id: String,
    pub modules: BTreeMap<String, bool>,
    pub routes: BTreeMap<String, bool>,
    pub ui_elements: BTreeMap<String, bool>,
    pub functionality: BTreeMap<String, bool>,
}

/// Partial grant update merged into a role's record.
///
/// Omitted tiers are left untouched; within a provided tier only the listed
/// keys change.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-role-permissions-request.ts"
)]
pub struct UpdateRolePermissionsRequest {
    #[serde(default)]
    pub modules: Option<BTreeMap<String, bool>>,
    #[serde(default)]
    pub routes: Option<BTreeMap<String, bool>>,
    #[serde(default)]
    pub ui_elements: Option<BTreeMap<String, bool>>,
    #[serde(default)]
    pub functionality: Option<BTreeMap<String, bool>>,
}
