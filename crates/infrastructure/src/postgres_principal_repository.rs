use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use campus_application::{NewPrincipal, PrincipalRepository};
use campus_core::{AppError, AppResult};
use campus_domain::{DepartmentId, Principal, Role, RoleId};

use crate::parse_uuid;
use crate::postgres_role_repository::RoleRow;

/// PostgreSQL-backed repository for principals and their role assignments.
#[derive(Clone)]
pub struct PostgresPrincipalRepository {
    pool: PgPool,
}

impl PostgresPrincipalRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn hydrate(&self, row: PrincipalRow) -> AppResult<Principal> {
        let roles = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT
                roles.id AS role_id,
                roles.name,
                roles.description,
                roles.is_system,
                roles.permissions
            FROM principal_roles
            INNER JOIN roles
                ON roles.id = principal_roles.role_id
            WHERE principal_roles.principal_id = $1
            ORDER BY roles.name
            "#,
        )
        .bind(row.principal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load roles for principal '{}': {error}",
                row.subject
            ))
        })?;

        Ok(Principal {
            subject: row.subject,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            roles: roles.into_iter().map(Role::from).collect(),
            department_id: row
                .department_id
                .map(|value| DepartmentId::new(value.to_string())),
        })
    }
}

#[derive(Debug, FromRow)]
struct PrincipalRow {
    principal_id: uuid::Uuid,
    subject: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    department_id: Option<uuid::Uuid>,
}

#[async_trait]
impl PrincipalRepository for PostgresPrincipalRepository {
    async fn find_principal(&self, subject: &str) -> AppResult<Option<Principal>> {
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT id AS principal_id, subject, email, first_name, last_name, department_id
            FROM principals
            WHERE subject = $1
            "#,
        )
        .bind(subject)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find principal '{subject}': {error}"))
        })?;

        match row {
            Some(row) => self.hydrate(row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn create_principal(&self, input: NewPrincipal) -> AppResult<Principal> {
        // Concurrent first requests for one subject converge on the same row.
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            INSERT INTO principals (subject, email, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (subject) DO UPDATE
                SET subject = principals.subject
            RETURNING id AS principal_id, subject, email, first_name, last_name, department_id
            "#,
        )
        .bind(input.subject.as_str())
        .bind(input.email.as_str())
        .bind(input.first_name.as_deref())
        .bind(input.last_name.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to create principal '{}': {error}",
                input.subject
            ))
        })?;

        self.hydrate(row).await
    }

    async fn replace_role_assignment(
        &self,
        subject: &str,
        role_ids: &[RoleId],
        department_id: Option<&DepartmentId>,
    ) -> AppResult<Principal> {
        let role_ids = role_ids
            .iter()
            .map(|role_id| {
                parse_uuid(role_id.as_str())
                    .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))
            })
            .collect::<AppResult<Vec<_>>>()?;
        let department_id = department_id
            .map(|department_id| {
                parse_uuid(department_id.as_str()).ok_or_else(|| {
                    AppError::NotFound(format!("department '{department_id}' was not found"))
                })
            })
            .transpose()?;

        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            UPDATE principals
            SET department_id = $2, updated_at = now()
            WHERE subject = $1
            RETURNING id AS principal_id, subject, email, first_name, last_name, department_id
            "#,
        )
        .bind(subject)
        .bind(department_id)
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update principal '{subject}': {error}"))
        })?
        .ok_or_else(|| AppError::NotFound(format!("principal '{subject}' was not found")))?;

        sqlx::query(
            r#"
            DELETE FROM principal_roles
            WHERE principal_id = $1
            "#,
        )
        .bind(row.principal_id)
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to clear roles of '{subject}': {error}"))
        })?;

        sqlx::query(
            r#"
            INSERT INTO principal_roles (principal_id, role_id)
            SELECT $1, role_id
            FROM UNNEST($2::uuid[]) AS requested(role_id)
            ON CONFLICT (principal_id, role_id) DO NOTHING
            "#,
        )
        .bind(row.principal_id)
        .bind(role_ids)
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to assign roles to '{subject}': {error}"))
        })?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        self.hydrate(row).await
    }
}

#[cfg(test)]
mod tests;
