//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_identity_provider;
mod in_memory_directory_repository;
mod postgres_department_repository;
mod postgres_principal_repository;
mod postgres_role_repository;

#[cfg(test)]
mod postgres_test_support;

pub use http_identity_provider::HttpIdentityProvider;
pub use in_memory_directory_repository::InMemoryDirectoryRepository;
pub use postgres_department_repository::PostgresDepartmentRepository;
pub use postgres_principal_repository::PostgresPrincipalRepository;
pub use postgres_role_repository::PostgresRoleRepository;

fn parse_uuid(value: &str) -> Option<uuid::Uuid> {
    uuid::Uuid::parse_str(value).ok()
}
