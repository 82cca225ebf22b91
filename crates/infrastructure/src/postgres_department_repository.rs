use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use campus_application::DepartmentRepository;
use campus_core::{AppError, AppResult};
use campus_domain::{Department, DepartmentId};

use crate::parse_uuid;

/// PostgreSQL-backed repository for departments.
#[derive(Clone)]
pub struct PostgresDepartmentRepository {
    pool: PgPool,
}

impl PostgresDepartmentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DepartmentRow {
    department_id: uuid::Uuid,
    name: String,
    slug: String,
}

impl TryFrom<DepartmentRow> for Department {
    type Error = AppError;

    fn try_from(row: DepartmentRow) -> Result<Self, Self::Error> {
        Department::new(
            DepartmentId::new(row.department_id.to_string()),
            row.name,
            row.slug,
        )
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to decode department '{}': {error}",
                row.department_id
            ))
        })
    }
}

#[async_trait]
impl DepartmentRepository for PostgresDepartmentRepository {
    async fn find_department(
        &self,
        department_id: &DepartmentId,
    ) -> AppResult<Option<Department>> {
        let Some(id) = parse_uuid(department_id.as_str()) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id AS department_id, name, slug
            FROM departments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to find department '{department_id}': {error}"
            ))
        })?;

        row.map(Department::try_from).transpose()
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        let rows = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id AS department_id, name, slug
            FROM departments
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list departments: {error}")))?;

        rows.into_iter().map(Department::try_from).collect()
    }
}
