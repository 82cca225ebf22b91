//! Authenticated principal and the role/permission query API.
//!
//! Every query is a pure function over a principal hydrated with its full set
//! of roles. A principal without roles answers `false` or an empty list.

use serde::{Deserialize, Serialize};

use crate::content::ContentType;
use crate::department::DepartmentId;
use crate::role::{Role, SystemRole};

/// Authenticated actor whose permissions are evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable subject from the external identity provider.
    pub subject: String,
    /// Primary contact address.
    pub email: String,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
    /// Assigned roles, unordered.
    pub roles: Vec<Role>,
    /// Home department, required for department leads.
    pub department_id: Option<DepartmentId>,
}

impl Principal {
    /// Returns whether any assigned role grants the permission.
    #[must_use]
    pub fn has_permission(&self, required: &str) -> bool {
        self.roles.iter().any(|role| role.grants(required))
    }

    /// Returns whether at least one of the permissions is granted.
    ///
    /// An empty requirement list is never satisfied.
    #[must_use]
    pub fn has_any_permission<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required
            .iter()
            .any(|permission| self.has_permission(permission.as_ref()))
    }

    /// Returns whether every permission is granted.
    ///
    /// An empty requirement list is trivially satisfied.
    #[must_use]
    pub fn has_all_permissions<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required
            .iter()
            .all(|permission| self.has_permission(permission.as_ref()))
    }

    /// Returns whether a role with exactly this name is assigned.
    #[must_use]
    pub fn has_role(&self, role_name: &str) -> bool {
        self.roles.iter().any(|role| role.name == role_name)
    }

    /// Returns whether any assigned role name appears in the list.
    #[must_use]
    pub fn has_any_role<S: AsRef<str>>(&self, role_names: &[S]) -> bool {
        role_names
            .iter()
            .any(|role_name| self.has_role(role_name.as_ref()))
    }

    /// Returns whether the principal holds the `Admin` role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(SystemRole::Admin.as_str())
    }

    /// Returns whether the principal may administer the department.
    ///
    /// Admins and registrars are unrestricted; department leads are limited to
    /// their home department.
    #[must_use]
    pub fn can_access_department(&self, department_id: &DepartmentId) -> bool {
        if self.is_admin() || self.has_role(SystemRole::Registrar.as_str()) {
            return true;
        }

        self.has_role(SystemRole::DepartmentLead.as_str())
            && self.department_id.as_ref() == Some(department_id)
    }

    /// Returns whether the principal may manage content with the given tag.
    ///
    /// Each role is checked on its own against a fixed mapping; grants from
    /// different roles are never combined.
    #[must_use]
    pub fn can_manage_content_type(&self, content_type: &str) -> bool {
        if self.is_admin() {
            return true;
        }

        self.roles
            .iter()
            .any(|role| role_manages_content_type(role.name.as_str(), content_type))
    }

    /// Returns every granted permission string across all roles.
    ///
    /// The list is flattened without deduplication and its order carries no
    /// meaning.
    #[must_use]
    pub fn user_permissions(&self) -> Vec<String> {
        self.roles
            .iter()
            .flat_map(|role| role.permissions.iter().cloned())
            .collect()
    }

    /// Returns the names of all assigned roles.
    #[must_use]
    pub fn user_roles(&self) -> Vec<String> {
        self.roles.iter().map(|role| role.name.clone()).collect()
    }
}

fn role_manages_content_type(role_name: &str, content_type: &str) -> bool {
    let (Ok(role), Ok(content_type)) = (
        role_name.parse::<SystemRole>(),
        content_type.parse::<ContentType>(),
    ) else {
        return false;
    };

    match role {
        SystemRole::ResearchLead => content_type == ContentType::Resource,
        SystemRole::Editor => content_type == ContentType::Blog,
        SystemRole::Registrar => {
            matches!(content_type, ContentType::Staff | ContentType::Department)
        }
        SystemRole::Admin | SystemRole::DepartmentLead | SystemRole::FacultyMember => false,
    }
}
