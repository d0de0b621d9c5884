use std::collections::HashMap;
use std::str::FromStr;

use permguard_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::{PermissionTier, RolePermissions};

/// Kind of permission-gated UI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiElementKind {
    /// Navigable screen, granted through the route tier.
    Route,
    /// Popup dialog.
    Modal,
    /// On/off control.
    Toggle,
    /// Conditionally shown panel.
    Conditional,
    /// Embedded component.
    Component,
    /// Triggerable action.
    Action,
}

impl UiElementKind {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Route => "route",
            Self::Modal => "modal",
            Self::Toggle => "toggle",
            Self::Conditional => "conditional",
            Self::Component => "component",
            Self::Action => "action",
        }
    }

    /// Returns the tier holding grants for elements of this kind.
    #[must_use]
    pub fn grant_tier(&self) -> PermissionTier {
        match self {
            Self::Route => PermissionTier::Route,
            _ => PermissionTier::UiElement,
        }
    }
}

impl FromStr for UiElementKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "route" => Ok(Self::Route),
            "modal" => Ok(Self::Modal),
            "toggle" => Ok(Self::Toggle),
            "conditional" => Ok(Self::Conditional),
            "component" => Ok(Self::Component),
            "action" => Ok(Self::Action),
            _ => Err(AppError::Validation(format!(
                "unknown ui element type '{value}'"
            ))),
        }
    }
}

/// Reference metadata describing one gated UI element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiElementDescriptor {
    id: NonEmptyString,
    name: NonEmptyString,
    #[serde(rename = "type")]
    kind: UiElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl UiElementDescriptor {
    /// Creates a validated element descriptor.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: UiElementKind,
        parent_id: Option<String>,
        level: u32,
        description: Option<String>,
    ) -> AppResult<Self> {
        let id = NonEmptyString::new(id)?;
        let parent_id = parent_id.filter(|value| !value.trim().is_empty());
        if parent_id.as_deref() == Some(id.as_str()) {
            return Err(AppError::Validation(format!(
                "ui element '{}' cannot be its own parent",
                id.as_str()
            )));
        }

        let description = description.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            kind,
            parent_id,
            level,
            description,
        })
    }

    /// Returns the element id, also used as its grant key.
    #[must_use]
    pub fn id(&self) -> &NonEmptyString {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the element kind.
    #[must_use]
    pub fn kind(&self) -> UiElementKind {
        self.kind
    }

    /// Returns the parent element id.
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Returns the depth, 0 for roots.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the element's own grant is set for the role.
    #[must_use]
    pub fn is_granted(&self, permissions: &RolePermissions) -> bool {
        permissions.is_granted(self.kind.grant_tier(), self.id.as_str())
    }
}

/// Validated tree of UI element descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UiElementCatalog {
    elements: Vec<UiElementDescriptor>,
}

impl UiElementCatalog {
    /// Creates a catalogue, checking ids are unique, parents exist and levels nest.
    pub fn new(elements: Vec<UiElementDescriptor>) -> AppResult<Self> {
        let mut by_id: HashMap<&str, &UiElementDescriptor> = HashMap::new();
        for element in &elements {
            if by_id.insert(element.id.as_str(), element).is_some() {
                return Err(AppError::Validation(format!(
                    "duplicate ui element id '{}'",
                    element.id.as_str()
                )));
            }
        }

        for element in &elements {
            let expected_level = match element.parent_id() {
                None => 0,
                Some(parent_id) => {
                    let parent = by_id.get(parent_id).ok_or_else(|| {
                        AppError::Validation(format!(
                            "ui element '{}' references unknown parent '{parent_id}'",
                            element.id.as_str()
                        ))
                    })?;
                    parent.level + 1
                }
            };

            if element.level != expected_level {
                return Err(AppError::Validation(format!(
                    "ui element '{}' has level {} but must be {expected_level}",
                    element.id.as_str(),
                    element.level
                )));
            }
        }

        Ok(Self { elements })
    }

    /// Returns all elements in declaration order.
    #[must_use]
    pub fn elements(&self) -> &[UiElementDescriptor] {
        self.elements.as_slice()
    }

    /// Finds an element by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&UiElementDescriptor> {
        self.elements.iter().find(|element| element.id.as_str() == id)
    }

    /// Returns direct children of `id` in declaration order.
    #[must_use]
    pub fn children_of(&self, id: &str) -> Vec<&UiElementDescriptor> {
        self.elements
            .iter()
            .filter(|element| element.parent_id() == Some(id))
            .collect()
    }

    /// Returns elements of one kind.
    #[must_use]
    pub fn of_kind(&self, kind: UiElementKind) -> Vec<&UiElementDescriptor> {
        self.elements
            .iter()
            .filter(|element| element.kind == kind)
            .collect()
    }

    /// Returns elements whose own grant and every ancestor's grant are set.
    ///
    /// This is the "hide child if parent hidden" walk; plain point lookups
    /// do not apply it.
    #[must_use]
    pub fn visible_to(&self, permissions: &RolePermissions) -> Vec<&UiElementDescriptor> {
        let mut ordered: Vec<&UiElementDescriptor> = self.elements.iter().collect();
        ordered.sort_by_key(|element| element.level);

        let mut visible: HashMap<&str, bool> = HashMap::with_capacity(ordered.len());
        for element in ordered {
            let parent_visible = element
                .parent_id()
                .map(|parent_id| visible.get(parent_id).copied().unwrap_or(false))
                .unwrap_or(true);
            visible.insert(
                element.id.as_str(),
                parent_visible && element.is_granted(permissions),
            );
        }

        self.elements
            .iter()
            .filter(|element| {
                visible
                    .get(element.id.as_str())
                    .copied()
                    .unwrap_or(false)
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for UiElementCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let elements = Vec::<UiElementDescriptor>::deserialize(deserializer)?;
        Self::new(elements).map_err(serde::de::Error::custom)
    }
}

/// Sidebar module reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    id: NonEmptyString,
    name: NonEmptyString,
}

impl ModuleDescriptor {
    /// Creates a validated module descriptor.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id: NonEmptyString::new(id)?,
            name: NonEmptyString::new(name)?,
        })
    }

    /// Returns the module id, also used as its grant key.
    #[must_use]
    pub fn id(&self) -> &NonEmptyString {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }
}
