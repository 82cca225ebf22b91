//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod content;
mod department;
mod permission;
mod principal;
mod role;

pub use content::ContentType;
pub use department::{Department, DepartmentId};
pub use permission::{GLOBAL_WILDCARD, Permission, PermissionAction, matches_permission};
pub use principal::Principal;
pub use role::{Role, RoleId, SystemRole};

/// Permissions gating administrative operations on the access model itself.
pub mod admin_permissions {
    /// Allows listing roles.
    pub const ROLE_READ: &str = "role:read";
    /// Allows creating custom roles.
    pub const ROLE_CREATE: &str = "role:create";
    /// Allows changing the roles and department of a principal.
    pub const USER_ASSIGN_ROLES: &str = "user:assign_roles";
    /// Allows listing departments.
    pub const DEPARTMENT_READ: &str = "department:read";
}
