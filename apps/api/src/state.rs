use std::sync::Arc;

use campus_application::{AuthorizationService, IdentityProvider, RoleAdminService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub role_admin_service: RoleAdminService,
    pub identity_provider: Arc<dyn IdentityProvider>,
}
