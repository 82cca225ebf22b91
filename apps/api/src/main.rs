//! Campus access-control API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;
use std::time::Duration;

use campus_application::{AuthorizationService, RoleAdminService};
use campus_core::{AppError, UserIdentity};
use campus_infrastructure::{
    HttpIdentityProvider, PostgresDepartmentRepository, PostgresPrincipalRepository,
    PostgresRoleRepository,
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let principal_repository = Arc::new(PostgresPrincipalRepository::new(pool.clone()));
    let role_repository = Arc::new(PostgresRoleRepository::new(pool.clone()));
    let department_repository = Arc::new(PostgresDepartmentRepository::new(pool));

    let authorization_service = AuthorizationService::new(principal_repository.clone());
    let role_admin_service = RoleAdminService::new(
        authorization_service.clone(),
        principal_repository,
        role_repository,
        department_repository,
    );

    if config.seed_system_roles {
        for role in role_admin_service.seed_system_roles().await? {
            info!(role = %role.name, "seeded system role");
        }
    }

    for subject in &config.bootstrap_admin_subjects {
        role_admin_service
            .bootstrap_admin(&UserIdentity::new(subject.as_str(), "", None, None))
            .await?;
        info!(%subject, "bootstrap administrator ensured");
    }

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.identity_timeout_secs))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;
    let identity_provider = Arc::new(HttpIdentityProvider::new(
        http_client,
        config.identity_userinfo_url.as_str(),
    ));

    let app_state = AppState {
        authorization_service,
        role_admin_service,
        identity_provider,
    };
    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "campus-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
