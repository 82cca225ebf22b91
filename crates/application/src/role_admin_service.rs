use std::str::FromStr;
use std::sync::Arc;

use campus_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use campus_domain::{Department, Permission, Principal, Role, SystemRole, admin_permissions};

use crate::{
    AuthorizationService, CreateRoleInput, DepartmentRepository, PrincipalRepository,
    RoleAssignmentInput, RoleAssignmentValidation, RoleAssignmentValidator, RoleRepository,
};

/// Application service for role administration workflows.
#[derive(Clone)]
pub struct RoleAdminService {
    authorization_service: AuthorizationService,
    principals: Arc<dyn PrincipalRepository>,
    roles: Arc<dyn RoleRepository>,
    departments: Arc<dyn DepartmentRepository>,
    validator: RoleAssignmentValidator,
}

impl RoleAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        principals: Arc<dyn PrincipalRepository>,
        roles: Arc<dyn RoleRepository>,
        departments: Arc<dyn DepartmentRepository>,
    ) -> Self {
        let validator = RoleAssignmentValidator::new(roles.clone(), departments.clone());

        Self {
            authorization_service,
            principals,
            roles,
            departments,
            validator,
        }
    }

    /// Returns all roles for administrative users.
    pub async fn list_roles(&self, actor: &Principal) -> AppResult<Vec<Role>> {
        self.authorization_service
            .require_permission(actor, admin_permissions::ROLE_READ)?;

        self.roles.list_roles().await
    }

    /// Creates a custom role after normalizing its grants.
    pub async fn create_role(&self, actor: &Principal, input: CreateRoleInput) -> AppResult<Role> {
        self.authorization_service
            .require_permission(actor, admin_permissions::ROLE_CREATE)?;

        let name = NonEmptyString::new(input.name.trim())?;
        let permissions = input
            .permissions
            .iter()
            .map(|value| Permission::from_str(value).map(|permission| permission.to_string()))
            .collect::<AppResult<Vec<_>>>()?;

        if self.roles.find_role_by_name(name.as_str()).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "role '{}' already exists",
                name.as_str()
            )));
        }

        self.roles
            .create_role(CreateRoleInput {
                name: name.into(),
                description: input.description.trim().to_owned(),
                is_system: false,
                permissions,
            })
            .await
    }

    /// Validates an assignment for the admin UI without persisting it.
    pub async fn validate_assignment(
        &self,
        actor: &Principal,
        input: &RoleAssignmentInput,
    ) -> AppResult<RoleAssignmentValidation> {
        self.authorization_service
            .require_permission(actor, admin_permissions::USER_ASSIGN_ROLES)?;

        self.validator
            .validate(&input.role_ids, input.department_id.as_ref())
            .await
    }

    /// Validates and persists the roles and department of a principal.
    ///
    /// A rejected validation surfaces as `AppError::Validation` carrying the
    /// validator's reason verbatim.
    pub async fn assign_roles(
        &self,
        actor: &Principal,
        subject: &str,
        input: RoleAssignmentInput,
    ) -> AppResult<Principal> {
        self.authorization_service
            .require_permission(actor, admin_permissions::USER_ASSIGN_ROLES)?;

        self.persist_assignment(subject, input).await
    }

    /// Returns all departments for administrative users.
    pub async fn list_departments(&self, actor: &Principal) -> AppResult<Vec<Department>> {
        self.authorization_service
            .require_permission(actor, admin_permissions::DEPARTMENT_READ)?;

        self.departments.list_departments().await
    }

    /// Creates any missing system role with its default grants.
    ///
    /// Existing roles are left untouched, including edited grants.
    pub async fn seed_system_roles(&self) -> AppResult<Vec<Role>> {
        let mut created = Vec::new();

        for system_role in SystemRole::all() {
            if self
                .roles
                .find_role_by_name(system_role.as_str())
                .await?
                .is_some()
            {
                continue;
            }

            let role = self
                .roles
                .create_role(CreateRoleInput {
                    name: system_role.as_str().to_owned(),
                    description: system_role.description().to_owned(),
                    is_system: true,
                    permissions: system_role
                        .default_permissions()
                        .iter()
                        .map(|value| (*value).to_owned())
                        .collect(),
                })
                .await?;
            created.push(role);
        }

        Ok(created)
    }

    /// Adds the `Admin` role to a configured bootstrap identity.
    ///
    /// A `Department_Lead` role held without a home department is dropped so
    /// the resulting assignment stays valid.
    pub async fn bootstrap_admin(&self, identity: &UserIdentity) -> AppResult<Principal> {
        let principal = self
            .authorization_service
            .resolve_principal(identity)
            .await?;
        if principal.is_admin() {
            return Ok(principal);
        }

        let admin_role = self
            .roles
            .find_role_by_name(SystemRole::Admin.as_str())
            .await?
            .ok_or_else(|| AppError::NotFound("role 'Admin' was not found".to_owned()))?;

        let orphaned_lead = principal.department_id.is_none();
        let mut role_ids: Vec<_> = principal
            .roles
            .iter()
            .filter(|role| !(orphaned_lead && role.name == SystemRole::DepartmentLead.as_str()))
            .map(|role| role.role_id.clone())
            .collect();
        role_ids.push(admin_role.role_id);

        self.persist_assignment(
            principal.subject.as_str(),
            RoleAssignmentInput {
                role_ids,
                department_id: principal.department_id.clone(),
            },
        )
        .await
    }

    async fn persist_assignment(
        &self,
        subject: &str,
        input: RoleAssignmentInput,
    ) -> AppResult<Principal> {
        match self
            .validator
            .validate(&input.role_ids, input.department_id.as_ref())
            .await?
        {
            RoleAssignmentValidation::Valid => {}
            RoleAssignmentValidation::Invalid(reason) => {
                return Err(AppError::Validation(reason));
            }
        }

        self.principals
            .replace_role_assignment(subject, &input.role_ids, input.department_id.as_ref())
            .await
    }
}
