use serde::{Deserialize, Serialize};

/// Identity returned by the external identity provider for a verified caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl UserIdentity {
    /// Creates a user identity from verified provider claims.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        email: impl Into<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            email: email.into(),
            first_name,
            last_name,
        }
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the primary contact address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the given name, if the provider returned one.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Returns the family name, if the provider returned one.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }
}
