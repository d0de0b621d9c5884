use std::collections::BTreeMap;

use permguard_domain::{
    AccessCriteria, GrantMap, ModuleDescriptor, Role, RolePermissions, RolePermissionsPatch,
    RouteDescriptor, RouteNode, UiElementDescriptor, User,
};

use super::{
    EvaluateAccessRequest, ModuleResponse, RoleResponse, RolePermissionsResponse,
    RouteDescriptorPayload, RouteNodeResponse, UiElementResponse, UpdateRolePermissionsRequest,
    UserResponse,
};

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id().as_str().to_owned(),
            name: value.name().as_str().to_owned(),
            email: value.email().as_str().to_owned(),
            role: value.role().as_str().to_owned(),
            status: value.status().as_str().to_owned(),
        }
    }
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            id: value.id().as_str().to_owned(),
            name: value.name().as_str().to_owned(),
            color_tag: value.color_tag().to_owned(),
        }
    }
}

fn grant_entries(grants: &GrantMap) -> BTreeMap<String, bool> {
    grants
        .iter()
        .map(|(key, granted)| (key.to_owned(), granted))
        .collect()
}

impl From<RolePermissions> for RolePermissionsResponse {
    fn from(value: RolePermissions) -> Self {
        Self {
            role_id: value.role_id().as_str().to_owned(),
            modules: grant_entries(value.modules()),
            routes: grant_entries(value.routes()),
            ui_elements: grant_entries(value.ui_elements()),
            functionality: grant_entries(value.functionality()),
        }
    }
}

impl From<UpdateRolePermissionsRequest> for RolePermissionsPatch {
    fn from(value: UpdateRolePermissionsRequest) -> Self {
        Self {
            modules: value.modules.map(GrantMap::from_iter),
            routes: value.routes.map(GrantMap::from_iter),
            ui_elements: value.ui_elements.map(GrantMap::from_iter),
            functionality: value.functionality.map(GrantMap::from_iter),
        }
    }
}

impl From<EvaluateAccessRequest> for AccessCriteria {
    fn from(value: EvaluateAccessRequest) -> Self {
        Self {
            authority: value.authority,
            module_id: value.module_id,
            route_id: value.route_id,
            functionality_id: value.functionality_id,
            ui_element_id: value.ui_element_id,
        }
    }
}

impl From<RouteDescriptorPayload> for RouteDescriptor {
    fn from(value: RouteDescriptorPayload) -> Self {
        Self {
            key: value.key,
            path: value.path,
            authority: value.authority,
            module_id: value.module_id,
            parent_route: value.parent_route,
            level: value.level,
            meta: value.meta,
        }
    }
}

impl From<RouteDescriptor> for RouteDescriptorPayload {
    fn from(value: RouteDescriptor) -> Self {
        Self {
            key: value.key,
            path: value.path,
            authority: value.authority,
            module_id: value.module_id,
            parent_route: value.parent_route,
            level: value.level,
            meta: value.meta,
        }
    }
}

impl From<RouteNode> for RouteNodeResponse {
    fn from(value: RouteNode) -> Self {
        Self {
            route: RouteDescriptorPayload::from(value.route),
            children: value
                .children
                .into_iter()
                .map(RouteNodeResponse::from)
                .collect(),
        }
    }
}

impl From<&UiElementDescriptor> for UiElementResponse {
    fn from(value: &UiElementDescriptor) -> Self {
        Self {
            id: value.id().as_str().to_owned(),
            name: value.name().as_str().to_owned(),
            kind: value.kind().as_str().to_owned(),
            parent_id: value.parent_id().map(str::to_owned),
            level: value.level(),
            description: value.description().map(str::to_owned),
        }
    }
}

impl From<&ModuleDescriptor> for ModuleResponse {
    fn from(value: &ModuleDescriptor) -> Self {
        Self {
            id: value.id().as_str().to_owned(),
            name: value.name().as_str().to_owned(),
        }
    }
}
