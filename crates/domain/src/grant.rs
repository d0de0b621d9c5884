use std::collections::BTreeMap;
use std::str::FromStr;

use permguard_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Resource class a grant map applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionTier {
    /// Top-level navigation areas.
    Module,
    /// Navigable screens addressed by dotted paths.
    Route,
    /// Modals, toggles, conditional panels and components.
    UiElement,
    /// Buttons, fields, views and actions inside a screen.
    Functionality,
}

impl PermissionTier {
    /// Returns a stable transport value for this tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Route => "route",
            Self::UiElement => "ui_element",
            Self::Functionality => "functionality",
        }
    }

    /// Returns all tiers.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionTier] = &[
            PermissionTier::Module,
            PermissionTier::Route,
            PermissionTier::UiElement,
            PermissionTier::Functionality,
        ];

        ALL
    }
}

impl FromStr for PermissionTier {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "module" | "modules" => Ok(Self::Module),
            "route" | "routes" => Ok(Self::Route),
            "ui_element" | "ui-element" | "ui_elements" | "uiElements" => Ok(Self::UiElement),
            "functionality" => Ok(Self::Functionality),
            _ => Err(AppError::Validation(format!(
                "unknown permission tier '{value}'"
            ))),
        }
    }
}

/// Validates a dotted resource key such as `settings.security.2fa-toggle`.
pub fn validate_grant_key(key: &str) -> AppResult<()> {
    if key.is_empty() {
        return Err(AppError::Validation(
            "permission key must not be empty".to_owned(),
        ));
    }

    if key.chars().any(char::is_whitespace) {
        return Err(AppError::Validation(format!(
            "permission key '{key}' must not contain whitespace"
        )));
    }

    if key.split('.').any(str::is_empty) {
        return Err(AppError::Validation(format!(
            "permission key '{key}' contains an empty segment"
        )));
    }

    Ok(())
}

/// Returns every dotted prefix of `key`, outermost first, ending with `key` itself.
///
/// `"a.b.c"` yields `"a"`, `"a.b"`, `"a.b.c"`.
pub fn dotted_path(key: &str) -> impl Iterator<Item = &str> {
    key.match_indices('.')
        .map(move |(index, _)| &key[..index])
        .chain(std::iter::once(key))
}

/// Per-role mapping from resource key to access decision. Missing keys deny.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantMap(BTreeMap<String, bool>);

impl GrantMap {
    /// Creates an empty grant map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the decision for `key`, denying when absent.
    #[must_use]
    pub fn is_granted(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    /// Returns the stored decision, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied()
    }

    /// Stores a decision for `key`.
    pub fn set(&mut self, key: impl Into<String>, granted: bool) {
        self.0.insert(key.into(), granted);
    }

    /// Overwrites the keys present in `other`, leaving all other keys untouched.
    pub fn merge(&mut self, other: &GrantMap) {
        for (key, granted) in &other.0 {
            self.0.insert(key.clone(), *granted);
        }
    }

    /// Validates every key in the map.
    pub fn validate(&self) -> AppResult<()> {
        self.0.keys().try_for_each(|key| validate_grant_key(key))
    }

    /// Iterates over stored decisions in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(key, granted)| (key.as_str(), *granted))
    }

    /// Returns the number of stored decisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no decision is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for GrantMap {
    fn from_iter<T: IntoIterator<Item = (K, bool)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, granted)| (key.into(), granted))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::{GrantMap, PermissionTier, dotted_path, validate_grant_key};

    #[test]
    fn tier_roundtrip_transport_value() {
        for tier in PermissionTier::all() {
            let restored = PermissionTier::from_str(tier.as_str());
            assert!(matches!(restored, Ok(value) if value == *tier));
        }
    }

    #[test]
    fn unknown_tier_is_rejected() {
        assert!(PermissionTier::from_str("page").is_err());
    }

    #[test]
    fn dotted_path_lists_prefixes_outermost_first() {
        let path: Vec<&str> = dotted_path("dashboard-settings.bot-control.configuration").collect();
        assert_eq!(
            path,
            vec![
                "dashboard-settings",
                "dashboard-settings.bot-control",
                "dashboard-settings.bot-control.configuration",
            ]
        );
    }

    #[test]
    fn grant_key_validation_rejects_malformed_keys() {
        assert!(validate_grant_key("").is_err());
        assert!(validate_grant_key("btn create").is_err());
        assert!(validate_grant_key("settings..general").is_err());
        assert!(validate_grant_key(".settings").is_err());
        assert!(validate_grant_key("settings.security.2fa-toggle").is_ok());
    }

    #[test]
    fn merge_overwrites_only_present_keys() {
        let mut grants = GrantMap::from_iter([("btn.create", false), ("view.table", true)]);
        grants.merge(&GrantMap::from_iter([("btn.create", true)]));

        assert!(grants.is_granted("btn.create"));
        assert!(grants.is_granted("view.table"));
        assert_eq!(grants.len(), 2);
    }

    #[test]
    fn grant_map_serializes_as_plain_object() {
        let grants = GrantMap::from_iter([("b", false), ("a", true)]);
        let json = serde_json::to_string(&grants).unwrap_or_default();
        assert_eq!(json, r#"{"a":true,"b":false}"#);
    }

    proptest! {
        #[test]
        fn absent_keys_are_denied(
            stored in proptest::collection::btree_map("[a-z]{1,6}", any::<bool>(), 0..8),
            absent_key in "[A-Z]{1,6}",
        ) {
            let grants = GrantMap::from_iter(stored);
            prop_assert!(!grants.is_granted(absent_key.as_str()));
        }

        #[test]
        fn merge_keeps_untouched_keys(
            base in proptest::collection::btree_map("[a-m]{1,4}", any::<bool>(), 0..8),
            patch in proptest::collection::btree_map("[n-z]{1,4}", any::<bool>(), 0..8),
        ) {
            let mut merged = GrantMap::from_iter(base.clone());
            merged.merge(&GrantMap::from_iter(patch.clone()));

            for (key, granted) in &base {
                prop_assert_eq!(merged.get(key), Some(*granted));
            }
            for (key, granted) in &patch {
                prop_assert_eq!(merged.get(key), Some(*granted));
            }
        }
    }
}
