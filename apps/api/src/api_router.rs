use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use campus_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::access::me_handler))
        .route(
            "/api/access/permissions/{permission}",
            get(handlers::access::check_permission_handler),
        )
        .route(
            "/api/access/check",
            post(handlers::access::check_permissions_handler),
        )
        .route(
            "/api/access/departments/{department_id}",
            get(handlers::access::check_department_access_handler),
        )
        .route(
            "/api/access/content-types/{content_type}",
            get(handlers::access::check_content_type_handler),
        )
        .route(
            "/api/security/roles",
            get(handlers::security::list_roles_handler)
                .post(handlers::security::create_role_handler),
        )
        .route(
            "/api/security/departments",
            get(handlers::security::list_departments_handler),
        )
        .route(
            "/api/security/role-assignments/validate",
            post(handlers::security::validate_role_assignment_handler),
        )
        .route(
            "/api/security/principals/{subject}/roles",
            put(handlers::security::assign_roles_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
