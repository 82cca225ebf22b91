use std::sync::Arc;

use campus_core::AppResult;
use campus_domain::{DepartmentId, RoleId, SystemRole};

use crate::{DepartmentRepository, RoleRepository};

/// Reported when any requested role identifier does not resolve.
pub const INVALID_ROLE_IDS_ERROR: &str = "One or more role IDs are invalid";
/// Reported when a department lead is assigned without a department.
pub const DEPARTMENT_REQUIRED_ERROR: &str = "A department is required for the Department_Lead role";
/// Reported when the requested department does not resolve.
pub const DEPARTMENT_NOT_FOUND_ERROR: &str = "Department not found";

/// Outcome of a role-assignment validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleAssignmentValidation {
    /// The assignment may be persisted.
    Valid,
    /// The assignment must not be persisted; carries an operator-facing reason.
    Invalid(String),
}

impl RoleAssignmentValidation {
    /// Returns whether the assignment may be persisted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the rejection reason, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason.as_str()),
        }
    }

    fn invalid(reason: &str) -> Self {
        Self::Invalid(reason.to_owned())
    }
}

/// Read-only gate run before any role assignment is written.
#[derive(Clone)]
pub struct RoleAssignmentValidator {
    roles: Arc<dyn RoleRepository>,
    departments: Arc<dyn DepartmentRepository>,
}

impl RoleAssignmentValidator {
    /// Creates a validator over the role and department stores.
    #[must_use]
    pub fn new(roles: Arc<dyn RoleRepository>, departments: Arc<dyn DepartmentRepository>) -> Self {
        Self { roles, departments }
    }

    /// Validates a requested assignment without mutating anything.
    ///
    /// Store failures are returned as errors and never folded into an
    /// `Invalid` outcome.
    pub async fn validate(
        &self,
        role_ids: &[RoleId],
        department_id: Option<&DepartmentId>,
    ) -> AppResult<RoleAssignmentValidation> {
        let roles = self.roles.find_roles_by_ids(role_ids).await?;
        if roles.len() != role_ids.len() {
            return Ok(RoleAssignmentValidation::invalid(INVALID_ROLE_IDS_ERROR));
        }

        let assigns_department_lead = roles
            .iter()
            .any(|role| role.name == SystemRole::DepartmentLead.as_str());
        if assigns_department_lead && department_id.is_none() {
            return Ok(RoleAssignmentValidation::invalid(DEPARTMENT_REQUIRED_ERROR));
        }

        if let Some(department_id) = department_id
            && self
                .departments
                .find_department(department_id)
                .await?
                .is_none()
        {
            return Ok(RoleAssignmentValidation::invalid(DEPARTMENT_NOT_FOUND_ERROR));
        }

        Ok(RoleAssignmentValidation::Valid)
    }
}

#[cfg(test)]
mod tests;
