mod catalog;
mod common;
mod conversions;
mod navigation;
mod permissions;
mod roles;
mod users;

pub use catalog::{ModuleResponse, UiElementResponse};
pub use common::{AccessResponse, EvaluateAccessRequest, HealthResponse};
pub use navigation::{RouteDescriptorPayload, RouteNodeResponse, RoutesRequest};
pub use permissions::{RolePermissionsResponse, UpdateRolePermissionsRequest};
pub use roles::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
pub use users::{CreateUserRequest, UpdateUserRequest, UserResponse};

#[cfg(test)]
mod tests {
    use super::{
        AccessResponse, CreateRoleRequest, CreateUserRequest, EvaluateAccessRequest,
        HealthResponse, ModuleResponse, RoleResponse, RolePermissionsResponse,
        RouteDescriptorPayload, RouteNodeResponse, RoutesRequest, UiElementResponse,
        UpdateRolePermissionsRequest, UpdateRoleRequest, UpdateUserRequest, UserResponse,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        UserResponse::export(&config)?;
        CreateUserRequest::export(&config)?;
        UpdateUserRequest::export(&config)?;
        RoleResponse::export(&config)?;
        CreateRoleRequest::export(&config)?;
        UpdateRoleRequest::export(&config)?;
        RolePermissionsResponse::export(&config)?;
        UpdateRolePermissionsRequest::export(&config)?;
        EvaluateAccessRequest::export(&config)?;
        AccessResponse::export(&config)?;
        RouteDescriptorPayload::export(&config)?;
        RouteNodeResponse::export(&config)?;
        RoutesRequest::export(&config)?;
        UiElementResponse::export(&config)?;
        ModuleResponse::export(&config)?;
        ErrorResponse::export(&config)?;
        HealthResponse::export(&config)?;

        Ok(())
    }
}
