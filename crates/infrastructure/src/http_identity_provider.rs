use async_trait::async_trait;
use campus_application::IdentityProvider;
use campus_core::{AppError, AppResult, UserIdentity};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

/// Identity provider adapter that resolves bearer tokens through the
/// provider's OpenID Connect userinfo endpoint.
pub struct HttpIdentityProvider {
    http_client: reqwest::Client,
    userinfo_url: String,
}

impl HttpIdentityProvider {
    /// Creates an adapter for the given userinfo endpoint.
    #[must_use]
    pub fn new(http_client: reqwest::Client, userinfo_url: impl Into<String>) -> Self {
        Self {
            http_client,
            userinfo_url: userinfo_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserInfoClaims {
    sub: String,
    email: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
}

impl UserInfoClaims {
    fn into_identity(self) -> AppResult<UserIdentity> {
        if self.sub.trim().is_empty() {
            return Err(AppError::Internal(
                "identity provider returned an empty subject".to_owned(),
            ));
        }

        Ok(UserIdentity::new(
            self.sub,
            self.email.unwrap_or_default(),
            self.given_name,
            self.family_name,
        ))
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn verify_token(&self, token: &str) -> AppResult<Option<UserIdentity>> {
        let response = self
            .http_client
            .get(self.userinfo_url.as_str())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("identity provider request failed: {error}"))
            })?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            debug!(%status, "identity provider rejected bearer token");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::Internal(format!(
                "identity provider responded with status {status}"
            )));
        }

        let claims = response.json::<UserInfoClaims>().await.map_err(|error| {
            AppError::Internal(format!("failed to decode identity provider claims: {error}"))
        })?;

        claims.into_identity().map(Some)
    }
}
