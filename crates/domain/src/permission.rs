use std::fmt::{Display, Formatter};
use std::str::FromStr;

use campus_core::AppError;

/// Token granting every action on every resource.
pub const GLOBAL_WILDCARD: &str = "*";

const ACTION_WILDCARD: &str = "*";
const SEPARATOR: char = ':';

/// Action half of a scoped permission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PermissionAction {
    /// A single named action such as `create`.
    Named(String),
    /// Every action on the resource.
    Wildcard,
}

/// Parsed permission grant.
///
/// Wildcards only carry meaning on the granted side. A required permission is
/// always compared as the raw string it arrived as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Permission {
    /// `*`: every permission on every resource.
    Global,
    /// `resource:action` or `resource:*`.
    Scoped {
        /// Resource part before the first colon.
        resource: String,
        /// Action part after the first colon.
        action: PermissionAction,
    },
}

impl Permission {
    /// Parses a stored grant, returning `None` when it is malformed.
    ///
    /// Only the first colon separates resource and action, so `a:b:c` is the
    /// action `b:c` on resource `a`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value == GLOBAL_WILDCARD {
            return Some(Self::Global);
        }

        let (resource, action) = value.split_once(SEPARATOR)?;
        let action = if action == ACTION_WILDCARD {
            PermissionAction::Wildcard
        } else {
            PermissionAction::Named(action.to_owned())
        };

        Some(Self::Scoped {
            resource: resource.to_owned(),
            action,
        })
    }

    /// Returns whether this grant covers the raw required permission.
    #[must_use]
    pub fn grants(&self, required: &str) -> bool {
        match self {
            Self::Global => true,
            Self::Scoped { resource, action } => match required.split_once(SEPARATOR) {
                Some((required_resource, required_action)) => {
                    required_resource == resource
                        && match action {
                            PermissionAction::Wildcard => true,
                            PermissionAction::Named(action) => action == required_action,
                        }
                }
                None => false,
            },
        }
    }
}

impl Display for Permission {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => formatter.write_str(GLOBAL_WILDCARD),
            Self::Scoped { resource, action } => match action {
                PermissionAction::Named(action) => write!(formatter, "{resource}:{action}"),
                PermissionAction::Wildcard => write!(formatter, "{resource}:{ACTION_WILDCARD}"),
            },
        }
    }
}

impl FromStr for Permission {
    type Err = AppError;

    /// Strict parsing used when administrators author role grants.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = || {
            AppError::Validation(format!(
                "permission '{value}' must be '*', '<resource>:*' or '<resource>:<action>'"
            ))
        };

        let permission = Self::parse(trimmed).ok_or_else(invalid)?;
        if let Self::Scoped { resource, action } = &permission {
            let action_is_empty =
                matches!(action, PermissionAction::Named(action) if action.is_empty());
            if resource.is_empty() || resource.contains('*') || action_is_empty {
                return Err(invalid());
            }
        }

        Ok(permission)
    }
}

/// Returns whether a granted permission string satisfies a required one.
///
/// Total over every input: malformed grants simply fail to match unless they
/// are byte-for-byte equal to the requirement.
#[must_use]
pub fn matches_permission(granted: &str, required: &str) -> bool {
    if granted == required {
        return true;
    }

    Permission::parse(granted).is_some_and(|permission| permission.grants(required))
}
