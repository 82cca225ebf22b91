use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use campus_application::{CreateRoleInput, RoleRepository};
use campus_core::{AppError, AppResult};
use campus_domain::{Role, RoleId};

use crate::parse_uuid;

/// PostgreSQL-backed repository for role definitions.
#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct RoleRow {
    pub(crate) role_id: uuid::Uuid,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) is_system: bool,
    pub(crate) permissions: Vec<String>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            role_id: RoleId::new(row.role_id.to_string()),
            name: row.name,
            description: row.description,
            is_system: row.is_system,
            permissions: row.permissions,
        }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id AS role_id, name, description, is_system, permissions
            FROM roles
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list roles: {error}")))?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn find_roles_by_ids(&self, role_ids: &[RoleId]) -> AppResult<Vec<Role>> {
        // Identifiers that are not UUIDs cannot exist in this store.
        let ids: Vec<uuid::Uuid> = role_ids
            .iter()
            .filter_map(|role_id| parse_uuid(role_id.as_str()))
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id AS role_id, name, description, is_system, permissions
            FROM roles
            WHERE id = ANY($1)
            ORDER BY name
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to resolve roles: {error}")))?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn find_role_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id AS role_id, name, description, is_system, permissions
            FROM roles
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find role '{name}': {error}")))?;

        Ok(row.map(Role::from))
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO roles (name, description, is_system, permissions)
            VALUES ($1, $2, $3, $4)
            RETURNING id AS role_id, name, description, is_system, permissions
            "#,
        )
        .bind(input.name.as_str())
        .bind(input.description.as_str())
        .bind(input.is_system)
        .bind(&input.permissions)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_role_conflict(error, input.name.as_str()))?;

        Ok(Role::from(row))
    }
}

fn map_role_conflict(error: sqlx::Error, role_name: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.is_unique_violation()
    {
        return AppError::Conflict(format!("role '{role_name}' already exists"));
    }

    AppError::Internal(format!("failed to create role '{role_name}': {error}"))
}
