use std::fmt::{Display, Formatter};

use permguard_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Role that can never be deleted.
pub const SUPERADMIN_ROLE_ID: &str = "superadmin";

/// Role that inherits the users of a deleted role.
pub const FALLBACK_ROLE_ID: &str = "viewer";

/// Stable role identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(NonEmptyString);

impl RoleId {
    /// Creates a validated role identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether this is the non-deletable root role.
    #[must_use]
    pub fn is_superadmin(&self) -> bool {
        self.as_str() == SUPERADMIN_ROLE_ID
    }

    /// Returns whether this is the role receiving reassigned users.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.as_str() == FALLBACK_ROLE_ID
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Role shown in administration and referenced by users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    id: RoleId,
    name: NonEmptyString,
    #[serde(alias = "color")]
    color_tag: String,
}

impl Role {
    /// Creates a validated role.
    pub fn new(id: RoleId, name: impl Into<String>, color_tag: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            color_tag: color_tag.into().trim().to_owned(),
        })
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> &RoleId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the presentation color tag.
    #[must_use]
    pub fn color_tag(&self) -> &str {
        self.color_tag.as_str()
    }

    /// Replaces the display name.
    pub fn rename(&mut self, name: impl Into<String>) -> AppResult<()> {
        self.name = NonEmptyString::new(name)?;
        Ok(())
    }

    /// Replaces the color tag.
    pub fn recolor(&mut self, color_tag: impl Into<String>) {
        self.color_tag = color_tag.into().trim().to_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::{Role, RoleId};

    #[test]
    fn role_id_rejects_blank_values() {
        assert!(RoleId::new(" ").is_err());
    }

    #[test]
    fn protected_and_fallback_ids_are_recognized() {
        let superadmin = RoleId::new("superadmin").map(|id| id.is_superadmin());
        let viewer = RoleId::new("viewer").map(|id| id.is_fallback());
        assert!(matches!(superadmin, Ok(true)));
        assert!(matches!(viewer, Ok(true)));
    }

    #[test]
    fn role_requires_name() {
        let Ok(id) = RoleId::new("auditor") else {
            panic!("role id must be valid");
        };
        assert!(Role::new(id, "", "bg-gray-100").is_err());
    }
}
