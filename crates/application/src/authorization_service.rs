use std::sync::Arc;

use campus_core::{AppError, AppResult, UserIdentity};
use campus_domain::{DepartmentId, Principal, SystemRole};

use crate::{NewPrincipal, PrincipalRepository};

/// Application service turning permission queries into request gates.
///
/// Negative answers become `AppError::Forbidden`; repository failures pass
/// through untouched so callers can tell them apart.
#[derive(Clone)]
pub struct AuthorizationService {
    principals: Arc<dyn PrincipalRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(principals: Arc<dyn PrincipalRepository>) -> Self {
        Self { principals }
    }

    /// Loads the principal for a verified identity, creating it on first sight.
    pub async fn resolve_principal(&self, identity: &UserIdentity) -> AppResult<Principal> {
        if let Some(principal) = self.principals.find_principal(identity.subject()).await? {
            return Ok(principal);
        }

        self.principals
            .create_principal(NewPrincipal::from(identity))
            .await
    }

    /// Ensures the principal holds the permission.
    pub fn require_permission(&self, principal: &Principal, required: &str) -> AppResult<()> {
        if principal.has_permission(required) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "principal '{}' is missing permission '{required}'",
            principal.subject
        )))
    }

    /// Ensures the principal holds at least one of the permissions.
    pub fn require_any_permission(&self, principal: &Principal, required: &[&str]) -> AppResult<()> {
        if principal.has_any_permission(required) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "principal '{}' holds none of the permissions [{}]",
            principal.subject,
            required.join(", ")
        )))
    }

    /// Ensures the principal holds every permission.
    pub fn require_all_permissions(
        &self,
        principal: &Principal,
        required: &[&str],
    ) -> AppResult<()> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|permission| !principal.has_permission(permission))
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "principal '{}' is missing permissions [{}]",
            principal.subject,
            missing.join(", ")
        )))
    }

    /// Ensures the principal holds the named role.
    pub fn require_role(&self, principal: &Principal, role_name: &str) -> AppResult<()> {
        if principal.has_role(role_name) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "principal '{}' does not hold role '{role_name}'",
            principal.subject
        )))
    }

    /// Ensures the principal is an administrator.
    pub fn require_admin(&self, principal: &Principal) -> AppResult<()> {
        self.require_role(principal, SystemRole::Admin.as_str())
    }

    /// Ensures the principal may administer the department.
    pub fn require_department_access(
        &self,
        principal: &Principal,
        department_id: &DepartmentId,
    ) -> AppResult<()> {
        if principal.can_access_department(department_id) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "principal '{}' cannot access department '{department_id}'",
            principal.subject
        )))
    }

    /// Ensures the principal may manage the content type.
    pub fn require_content_type(&self, principal: &Principal, content_type: &str) -> AppResult<()> {
        if principal.can_manage_content_type(content_type) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "principal '{}' cannot manage '{content_type}' content",
            principal.subject
        )))
    }
}
