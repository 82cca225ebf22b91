use std::fmt::{Display, Formatter};
use std::str::FromStr;

use campus_core::AppError;
use serde::{Deserialize, Serialize};

use crate::permission::matches_permission;

/// Opaque role identifier issued by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleId(String);

impl RoleId {
    /// Wraps a stored role identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Named bundle of permission strings assignable to principals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Stable role identifier.
    pub role_id: RoleId,
    /// Unique role name.
    pub name: String,
    /// Free-text description shown to administrators.
    pub description: String,
    /// Indicates a seeded, system-managed role.
    pub is_system: bool,
    /// Granted permission strings. Duplicates are harmless.
    pub permissions: Vec<String>,
}

impl Role {
    /// Returns whether any of this role's grants covers the requirement.
    #[must_use]
    pub fn grants(&self, required: &str) -> bool {
        self.permissions
            .iter()
            .any(|granted| matches_permission(granted, required))
    }
}

/// Roles the site relies on by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemRole {
    /// Unrestricted administrator.
    Admin,
    /// Blog author and editor.
    Editor,
    /// Lead scoped to one home department.
    DepartmentLead,
    /// Staff and department records across the college.
    Registrar,
    /// Research resources and statistics.
    ResearchLead,
    /// Read-mostly teaching staff.
    FacultyMember,
}

impl SystemRole {
    /// Returns the stored role name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Editor => "Editor",
            Self::DepartmentLead => "Department_Lead",
            Self::Registrar => "Registrar",
            Self::ResearchLead => "Research_Lead",
            Self::FacultyMember => "Faculty_Member",
        }
    }

    /// Returns all system roles in seeding order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[SystemRole] = &[
            SystemRole::Admin,
            SystemRole::Editor,
            SystemRole::DepartmentLead,
            SystemRole::Registrar,
            SystemRole::ResearchLead,
            SystemRole::FacultyMember,
        ];

        ALL
    }

    /// Returns the description seeded for this role.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Admin => "Full access to every administrative area",
            Self::Editor => "Writes and publishes blog posts",
            Self::DepartmentLead => "Manages staff and programs of one department",
            Self::Registrar => "Manages staff, departments and programs college-wide",
            Self::ResearchLead => "Manages research resources and statistics",
            Self::FacultyMember => "Reads internal program and staff information",
        }
    }

    /// Returns the permissions seeded for this role.
    #[must_use]
    pub fn default_permissions(&self) -> &'static [&'static str] {
        match self {
            Self::Admin => &["*"],
            Self::Editor => &[
                "blog:create",
                "blog:read",
                "blog:update",
                "blog:delete",
                "media:upload",
            ],
            Self::DepartmentLead => &[
                "department:read",
                "department:update",
                "staff:read",
                "staff:update",
                "program:read",
                "program:update",
            ],
            Self::Registrar => &["staff:*", "department:*", "program:*"],
            Self::ResearchLead => &["resource:*", "stats:read"],
            Self::FacultyMember => &["blog:read", "program:read", "staff:read"],
        }
    }
}

impl Display for SystemRole {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SystemRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown system role '{value}'")))
    }
}
