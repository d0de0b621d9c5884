use serde::Serialize;
use ts_rs::TS;

/// API representation of a UI element catalogue entry.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/ui-element-response.ts"
)]
pub struct UiElementResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub parent_id: Option<String>,
    pub level: u32,
    pub description: Option<String>,
}

/// API representation of a sidebar module.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/module-response.ts"
)]
pub struct ModuleResponse {
    pub id: String,
    pub name: String,
}
