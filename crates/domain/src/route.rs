use std::collections::HashMap;

use permguard_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Route descriptor as declared by navigation code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    /// Dotted route key, also used as the route grant key.
    pub key: String,
    /// URL path rendered by the router.
    #[serde(default)]
    pub path: String,
    /// Legacy authority strings guarding the route.
    #[serde(default)]
    pub authority: Vec<String>,
    /// Module the route belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    /// Key of the parent route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_route: Option<String>,
    /// Nesting depth hint for presentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// Opaque presentation metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl RouteDescriptor {
    /// Creates a top-level route without authority or module.
    #[must_use]
    pub fn new(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            authority: Vec::new(),
            module_id: None,
            parent_route: None,
            level: None,
            meta: None,
        }
    }

    /// Sets the parent route key.
    #[must_use]
    pub fn with_parent(mut self, parent_route: impl Into<String>) -> Self {
        self.parent_route = Some(parent_route.into());
        self
    }

    /// Sets the owning module.
    #[must_use]
    pub fn with_module(mut self, module_id: impl Into<String>) -> Self {
        self.module_id = Some(module_id.into());
        self
    }

    /// Replaces the authority list.
    #[must_use]
    pub fn with_authority<I, S>(mut self, authority: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authority = authority.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the parent key, treating an empty string as no parent.
    #[must_use]
    pub fn parent_key(&self) -> Option<&str> {
        self.parent_route.as_deref().filter(|value| !value.is_empty())
    }

    /// Returns the module id, treating an empty string as no module.
    #[must_use]
    pub fn module_key(&self) -> Option<&str> {
        self.module_id.as_deref().filter(|value| !value.is_empty())
    }
}

/// Route with its nested children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteNode {
    /// The route itself.
    #[serde(flatten)]
    pub route: RouteDescriptor,
    /// Child routes in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// Returns the number of routes in this subtree, including the node.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(RouteNode::subtree_len)
            .sum::<usize>()
    }
}

/// Deepest route nesting accepted when building a tree; roots are at depth 1.
pub const MAX_ROUTE_DEPTH: usize = 64;

/// Rebuilds a route tree from a flat list.
///
/// Routes without a parent become roots in input order. A parent key resolves
/// to the last route declaring that key; only that route receives the child.
/// A route whose parent is not part of the list is dropped along with its
/// descendants, as are routes caught in parent cycles. Children keep input
/// order. Trees nested deeper than [`MAX_ROUTE_DEPTH`] are rejected.
pub fn build_route_hierarchy(routes: &[RouteDescriptor]) -> AppResult<Vec<RouteNode>> {
    let index_by_key: HashMap<&str, usize> = routes
        .iter()
        .enumerate()
        .map(|(index, route)| (route.key.as_str(), index))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); routes.len()];
    let mut roots = Vec::new();
    for (index, route) in routes.iter().enumerate() {
        match route.parent_key() {
            Some(parent) => {
                if let Some(&parent_index) = index_by_key.get(parent) {
                    children[parent_index].push(index);
                }
            }
            None => roots.push(index),
        }
    }

    // Each route has at most one resolved parent, so walking down from the
    // roots visits every reachable route exactly once.
    let mut pending: Vec<(usize, usize)> = roots.iter().map(|&index| (index, 1)).collect();
    while let Some((index, depth)) = pending.pop() {
        if depth > MAX_ROUTE_DEPTH {
            return Err(AppError::Validation(format!(
                "route '{}' is nested deeper than {MAX_ROUTE_DEPTH} levels",
                routes[index].key
            )));
        }
        pending.extend(children[index].iter().map(|&child| (child, depth + 1)));
    }

    Ok(roots
        .into_iter()
        .map(|index| attach_children(index, routes, &children))
        .collect())
}

fn attach_children(
    index: usize,
    routes: &[RouteDescriptor],
    children: &[Vec<usize>],
) -> RouteNode {
    RouteNode {
        route: routes[index].clone(),
        children: children[index]
            .iter()
            .map(|&child| attach_children(child, routes, children))
            .collect(),
    }
}
