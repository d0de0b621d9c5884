use permguard_domain::UserStatus;

/// Input payload for creating a user. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role id; must reference an existing role.
    pub role: String,
    /// Initial account status.
    pub status: UserStatus,
}

/// Partial user update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New role id.
    pub role: Option<String>,
    /// New account status.
    pub status: Option<UserStatus>,
}

/// Input payload for creating a role. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    /// Display name.
    pub name: String,
    /// Presentation color tag.
    pub color_tag: String,
}

/// Partial role update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New color tag.
    pub color_tag: Option<String>,
}
