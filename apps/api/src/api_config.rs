use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use campus_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub database_max_connections: u32,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub identity_userinfo_url: Url,
    pub identity_timeout_secs: u64,
    pub bootstrap_admin_subjects: Vec<String>,
    pub seed_system_roles: bool,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(10);
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let identity_userinfo_url = Url::parse(&required_env("IDENTITY_USERINFO_URL")?)
            .map_err(|error| {
                AppError::Validation(format!("invalid IDENTITY_USERINFO_URL: {error}"))
            })?;
        let identity_timeout_secs = env::var("IDENTITY_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(5);

        let bootstrap_admin_subjects = env::var("BOOTSTRAP_ADMIN_SUBJECTS")
            .map(|value| parse_subject_list(&value))
            .unwrap_or_default();
        let seed_system_roles = env::var("SEED_SYSTEM_ROLES")
            .ok()
            .map(|value| parse_flag("SEED_SYSTEM_ROLES", &value))
            .transpose()?
            .unwrap_or(true);

        Ok(Self {
            migrate_only,
            database_url,
            database_max_connections,
            frontend_url,
            api_host,
            api_port,
            identity_userinfo_url,
            identity_timeout_secs,
            bootstrap_admin_subjects,
            seed_system_roles,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_subject_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|subject| !subject.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_flag(name: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(AppError::Validation(format!(
            "{name} must be a boolean, got '{value}'"
        ))),
    }
}

fn required_env(name: &str) -> Result<String, AppError> {
    let value = env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{parse_flag, parse_subject_list};

    #[test]
    fn subject_list_skips_blank_entries() {
        assert_eq!(
            parse_subject_list(" user_1, ,user_2 ,"),
            vec!["user_1".to_owned(), "user_2".to_owned()]
        );
        assert!(parse_subject_list("").is_empty());
    }

    #[test]
    fn flag_accepts_common_boolean_spellings() {
        for value in ["true", "TRUE", "1", "yes", " on "] {
            assert!(matches!(parse_flag("FLAG", value), Ok(true)), "{value}");
        }
        for value in ["false", "False", "0", "no", "off"] {
            assert!(matches!(parse_flag("FLAG", value), Ok(false)), "{value}");
        }
    }

    #[test]
    fn flag_rejects_unrecognized_values() {
        assert!(parse_flag("FLAG", "maybe").is_err());
        assert!(parse_flag("FLAG", "").is_err());
    }
}
