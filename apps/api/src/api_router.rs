use axum::Router;
use axum::routing::{get, post, put};
use permguard_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

use cors::build_cors_layer;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let user_routes = Router::new()
        .route(
            "/api/users",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/api/users/{user_id}",
            put(handlers::users::update_user_handler).delete(handlers::users::delete_user_handler),
        )
        .route(
            "/api/users/{user_id}/permissions",
            get(handlers::users::user_permissions_handler),
        )
        .route(
            "/api/users/{user_id}/access/evaluate",
            post(handlers::access::evaluate_access_handler),
        )
        .route(
            "/api/users/{user_id}/access/{tier}/{key}",
            get(handlers::access::check_access_handler),
        )
        .route(
            "/api/users/{user_id}/routes/filter",
            post(handlers::navigation::filter_routes_handler),
        )
        .route(
            "/api/users/{user_id}/navigation",
            post(handlers::navigation::user_navigation_handler),
        )
        .route(
            "/api/users/{user_id}/ui-elements",
            get(handlers::catalog::visible_ui_elements_handler),
        )
        .route(
            "/api/users/{user_id}/modules",
            get(handlers::catalog::visible_modules_handler),
        );

    let role_routes = Router::new()
        .route(
            "/api/roles",
            get(handlers::roles::list_roles_handler).post(handlers::roles::create_role_handler),
        )
        .route(
            "/api/roles/{role_id}",
            put(handlers::roles::update_role_handler).delete(handlers::roles::delete_role_handler),
        )
        .route(
            "/api/roles/{role_id}/permissions",
            get(handlers::permissions::role_permissions_handler)
                .put(handlers::permissions::update_role_permissions_handler),
        )
        .route(
            "/api/permissions",
            get(handlers::permissions::list_permissions_handler),
        );

    let catalog_routes = Router::new()
        .route(
            "/api/ui-elements",
            get(handlers::catalog::ui_elements_handler),
        )
        .route("/api/modules", get(handlers::catalog::modules_handler))
        .route(
            "/api/routes/hierarchy",
            post(handlers::navigation::route_hierarchy_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(user_routes)
        .merge(role_routes)
        .merge(catalog_routes)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
