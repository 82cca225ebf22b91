//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod authorization_service;
mod role_admin_service;
mod role_assignment_validator;

#[cfg(test)]
mod test_fakes;

pub use access_ports::{
    CreateRoleInput, DepartmentRepository, IdentityProvider, NewPrincipal, PrincipalRepository,
    RoleAssignmentInput, RoleRepository,
};
pub use authorization_service::AuthorizationService;
pub use role_admin_service::RoleAdminService;
pub use role_assignment_validator::{
    DEPARTMENT_NOT_FOUND_ERROR, DEPARTMENT_REQUIRED_ERROR, INVALID_ROLE_IDS_ERROR,
    RoleAssignmentValidation, RoleAssignmentValidator,
};
