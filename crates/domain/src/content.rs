use std::str::FromStr;

use campus_core::AppError;
use serde::{Deserialize, Serialize};

/// Administrable content areas of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Blog posts.
    Blog,
    /// Staff directory entries.
    Staff,
    /// Department pages.
    Department,
    /// Research resources.
    Resource,
    /// Academic programs.
    Program,
}

impl ContentType {
    /// Returns the stable tag for this content type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Staff => "staff",
            Self::Department => "department",
            Self::Resource => "resource",
            Self::Program => "program",
        }
    }
}

impl FromStr for ContentType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "blog" => Ok(Self::Blog),
            "staff" => Ok(Self::Staff),
            "department" => Ok(Self::Department),
            "resource" => Ok(Self::Resource),
            "program" => Ok(Self::Program),
            _ => Err(AppError::Validation(format!(
                "unknown content type '{value}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::ContentType;

    #[test]
    fn content_type_parses_known_tags_only() {
        assert!(matches!(ContentType::from_str("blog"), Ok(ContentType::Blog)));
        assert!(ContentType::from_str("Blog").is_err());
        assert!(ContentType::from_str("news").is_err());
    }
}
