use std::collections::BTreeSet;

use campus_application::RoleAssignmentValidation;
use campus_domain::{Department, DepartmentId, Principal, Role, RoleId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// API representation of the authenticated principal.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/principal-response.ts"
)]
pub struct PrincipalResponse {
    pub subject: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department_id: Option<String>,
    pub roles: Vec<String>,
    /// Effective grants, deduplicated and sorted for display.
    pub permissions: Vec<String>,
    pub is_admin: bool,
}

impl From<Principal> for PrincipalResponse {
    fn from(value: Principal) -> Self {
        let permissions: BTreeSet<String> = value.user_permissions().into_iter().collect();

        Self {
            roles: value.user_roles(),
            permissions: permissions.into_iter().collect(),
            is_admin: value.is_admin(),
            subject: value.subject,
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            department_id: value.department_id.map(|id| id.as_str().to_owned()),
        }
    }
}

/// API representation of a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub role_id: String,
    pub name: String,
    pub description: String,
    pub is_system: bool,
    pub permissions: Vec<String>,
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            role_id: value.role_id.as_str().to_owned(),
            name: value.name,
            description: value.description,
            is_system: value.is_system,
            permissions: value.permissions,
        }
    }
}

/// Incoming payload for custom role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub permissions: Vec<String>,
}

/// Incoming payload for role assignment and its validation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-assignment-request.ts"
)]
pub struct RoleAssignmentRequest {
    pub role_ids: Vec<String>,
    #[serde(default)]
    pub department_id: Option<String>,
}

impl From<RoleAssignmentRequest> for campus_application::RoleAssignmentInput {
    fn from(value: RoleAssignmentRequest) -> Self {
        Self {
            role_ids: value.role_ids.into_iter().map(RoleId::new).collect(),
            // Admin forms submit an empty string for "no department".
            department_id: value
                .department_id
                .filter(|id| !id.trim().is_empty())
                .map(DepartmentId::new),
        }
    }
}

/// Result of a role-assignment validation.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-assignment-validation-response.ts"
)]
pub struct RoleAssignmentValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RoleAssignmentValidation> for RoleAssignmentValidationResponse {
    fn from(value: RoleAssignmentValidation) -> Self {
        match value {
            RoleAssignmentValidation::Valid => Self {
                valid: true,
                error: None,
            },
            RoleAssignmentValidation::Invalid(reason) => Self {
                valid: false,
                error: Some(reason),
            },
        }
    }
}

/// API representation of a department.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/department-response.ts"
)]
pub struct DepartmentResponse {
    pub department_id: String,
    pub name: String,
    pub slug: String,
}

impl From<Department> for DepartmentResponse {
    fn from(value: Department) -> Self {
        Self {
            department_id: value.department_id().as_str().to_owned(),
            name: value.name().to_owned(),
            slug: value.slug().to_owned(),
        }
    }
}

/// How a list of permissions is combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-check-mode.ts"
)]
pub enum PermissionCheckMode {
    #[default]
    Any,
    All,
}

/// Incoming payload for multi-permission checks.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-check-request.ts"
)]
pub struct PermissionCheckRequest {
    pub permissions: Vec<String>,
    #[serde(default)]
    pub mode: PermissionCheckMode,
}

/// Yes/no answer for page loaders.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/access-decision-response.ts"
)]
pub struct AccessDecisionResponse {
    pub allowed: bool,
}
