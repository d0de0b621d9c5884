use permguard_core::AppResult;
use permguard_domain::{RouteDescriptor, RouteNode, build_route_hierarchy};
use tracing::debug;

use crate::PermissionResolver;

/// Navigation construction over the resolver.
#[derive(Clone)]
pub struct RouteService {
    resolver: PermissionResolver,
}

impl RouteService {
    /// Creates a route service.
    #[must_use]
    pub fn new(resolver: PermissionResolver) -> Self {
        Self { resolver }
    }

    /// Keeps routes whose module gate, route gate and authority gate all pass.
    ///
    /// Each route is checked on its own; parents are not consulted. Unknown users
    /// get an empty list.
    pub async fn filter_routes_by_permission(
        &self,
        routes: &[RouteDescriptor],
        user_id: &str,
    ) -> AppResult<Vec<RouteDescriptor>> {
        let Some(permissions) = self.resolver.user_permissions(user_id).await? else {
            debug!(user_id, "unknown user, no routes accessible");
            return Ok(Vec::new());
        };

        Ok(routes
            .iter()
            .filter(|route| {
                let module_allowed = route
                    .module_key()
                    .is_none_or(|module_id| permissions.has_module_access(module_id));
                let route_allowed = permissions.has_route_access(route.key.as_str());
                let authority_allowed =
                    route.authority.is_empty() || permissions.has_authority(route.authority.as_slice());

                module_allowed && route_allowed && authority_allowed
            })
            .cloned()
            .collect())
    }

    /// Rebuilds the parent/child tree of a flat route list.
    pub fn generate_route_hierarchy(
        &self,
        routes: &[RouteDescriptor],
    ) -> AppResult<Vec<RouteNode>> {
        build_route_hierarchy(routes)
    }

    /// Filters routes for the user, then builds the tree from the survivors.
    ///
    /// A granted child whose parent was filtered out is dropped with it.
    pub async fn accessible_navigation(
        &self,
        routes: &[RouteDescriptor],
        user_id: &str,
    ) -> AppResult<Vec<RouteNode>> {
        let accessible = self.filter_routes_by_permission(routes, user_id).await?;
        build_route_hierarchy(&accessible)
    }
}
