use std::fmt::{Display, Formatter};

use campus_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Opaque department identifier issued by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DepartmentId(String);

impl DepartmentId {
    /// Wraps a stored department identifier.
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

impl Display for DepartmentId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Academic department referenced by principals and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DepartmentRecord")]
pub struct Department {
    department_id: DepartmentId,
    name: String,
    slug: String,
}

impl Department {
    /// Creates a department after validating its name and slug.
    pub fn new(
        department_id: DepartmentId,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> AppResult<Self> {
        let name = name.into();
        let slug = slug.into();

        if name.trim().is_empty() {
            return Err(AppError::Validation(
                "department name must not be empty".to_owned(),
            ));
        }

        let slug_is_valid = !slug.is_empty()
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && slug.chars().all(|character| {
                character.is_ascii_lowercase() || character.is_ascii_digit() || character == '-'
            });
        if !slug_is_valid {
            return Err(AppError::Validation(format!(
                "department slug '{slug}' must use lowercase letters, digits and inner hyphens"
            )));
        }

        Ok(Self {
            department_id,
            name,
            slug,
        })
    }

    /// Returns the department identifier.
    #[must_use]
    pub fn department_id(&self) -> &DepartmentId {
        &self.department_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the unique URL slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.slug.as_str()
    }
}

#[derive(Deserialize)]
struct DepartmentRecord {
    department_id: DepartmentId,
    name: String,
    slug: String,
}

impl TryFrom<DepartmentRecord> for Department {
    type Error = AppError;

    fn try_from(value: DepartmentRecord) -> Result<Self, Self::Error> {
        Self::new(value.department_id, value.name, value.slug)
    }
}
