use async_trait::async_trait;

use campus_core::{AppResult, UserIdentity};
use campus_domain::{Department, DepartmentId, Principal, Role, RoleId};

/// Input payload for creating a principal on first verified sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrincipal {
    /// Stable subject from the identity provider.
    pub subject: String,
    /// Primary contact address.
    pub email: String,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
}

impl From<&UserIdentity> for NewPrincipal {
    fn from(identity: &UserIdentity) -> Self {
        Self {
            subject: identity.subject().to_owned(),
            email: identity.email().to_owned(),
            first_name: identity.first_name().map(str::to_owned),
            last_name: identity.last_name().map(str::to_owned),
        }
    }
}

/// Input payload for creating roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Unique role name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Marks seeded roles.
    pub is_system: bool,
    /// Granted permission strings.
    pub permissions: Vec<String>,
}

/// Requested role and department assignment for one principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentInput {
    /// Roles that replace the current assignment.
    pub role_ids: Vec<RoleId>,
    /// Home department, required for department leads.
    pub department_id: Option<DepartmentId>,
}

/// Repository port for principals hydrated with roles and department.
#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    /// Finds a principal by identity subject with roles eagerly loaded.
    async fn find_principal(&self, subject: &str) -> AppResult<Option<Principal>>;

    /// Creates a principal without roles.
    async fn create_principal(&self, input: NewPrincipal) -> AppResult<Principal>;

    /// Replaces the assigned roles and home department of a principal.
    async fn replace_role_assignment(
        &self,
        subject: &str,
        role_ids: &[RoleId],
        department_id: Option<&DepartmentId>,
    ) -> AppResult<Principal>;
}

/// Repository port for role definitions.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Lists all roles ordered by name.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Resolves the roles that exist among the given identifiers.
    ///
    /// Unknown identifiers are skipped rather than reported.
    async fn find_roles_by_ids(&self, role_ids: &[RoleId]) -> AppResult<Vec<Role>>;

    /// Finds a role by its unique name.
    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    /// Creates a role.
    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role>;
}

/// Repository port for departments.
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Finds a department by identifier.
    async fn find_department(&self, department_id: &DepartmentId)
    -> AppResult<Option<Department>>;

    /// Lists all departments ordered by name.
    async fn list_departments(&self) -> AppResult<Vec<Department>>;
}

/// Port for the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves a bearer token to a verified identity.
    ///
    /// Returns `Ok(None)` when the provider rejects the token.
    async fn verify_token(&self, token: &str) -> AppResult<Option<UserIdentity>>;
}
