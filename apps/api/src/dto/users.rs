use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

/// Incoming payload for user creation. Status defaults to `active`.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Incoming payload for partial user updates.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-user-request.ts"
)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
