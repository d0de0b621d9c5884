//! User domain types and validation rules.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use permguard_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::RoleId;

/// Opaque identifier of a user record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(NonEmptyString);

impl UserId {
    /// Creates a validated user identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Account status shown in user administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// User may sign in.
    Active,
    /// User is disabled.
    Inactive,
}

impl UserStatus {
    /// Returns the stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for UserStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(AppError::Validation(format!(
                "unknown user status '{value}'"
            ))),
        }
    }
}

/// User with a single role assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: NonEmptyString,
    email: EmailAddress,
    role: RoleId,
    status: UserStatus,
}

impl User {
    /// Creates a validated user.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: RoleId,
        status: UserStatus,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            email: EmailAddress::new(email)?,
            role,
            status,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the assigned role.
    #[must_use]
    pub fn role(&self) -> &RoleId {
        &self.role
    }

    /// Returns the account status.
    #[must_use]
    pub fn status(&self) -> UserStatus {
        self.status
    }

    /// Moves the user to another role.
    pub fn assign_role(&mut self, role: RoleId) {
        self.role = role;
    }

    /// Replaces the display name.
    pub fn rename(&mut self, name: impl Into<String>) -> AppResult<()> {
        self.name = NonEmptyString::new(name)?;
        Ok(())
    }

    /// Replaces the email address.
    pub fn change_email(&mut self, email: impl Into<String>) -> AppResult<()> {
        self.email = EmailAddress::new(email)?;
        Ok(())
    }

    /// Replaces the account status.
    pub fn set_status(&mut self, status: UserStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_is_accepted() {
        let email = EmailAddress::new("USER@Example.COM");
        assert!(email.is_ok());
        assert_eq!(
            email.unwrap_or_else(|_| panic!("test")).as_str(),
            "user@example.com"
        );
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(EmailAddress::new("noatsign").is_err());
    }

    #[test]
    fn email_with_two_at_signs_is_rejected() {
        assert!(EmailAddress::new("a@b@example.com").is_err());
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(EmailAddress::new("user@nodot").is_err());
    }

    #[test]
    fn user_requires_non_empty_name() {
        let (Ok(id), Ok(role)) = (UserId::new("7"), RoleId::new("viewer")) else {
            panic!("test identifiers must be valid");
        };
        let user = User::new(id, "  ", "a@example.com", role, UserStatus::Active);
        assert!(user.is_err());
    }

    #[test]
    fn user_status_roundtrip_storage_value() {
        let restored = UserStatus::from_str(UserStatus::Inactive.as_str());
        assert!(matches!(restored, Ok(UserStatus::Inactive)));
        assert!(UserStatus::from_str("suspended").is_err());
    }
}
