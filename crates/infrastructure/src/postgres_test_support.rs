use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connects to `DATABASE_URL` and applies migrations, or skips when unset.
pub(crate) async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres repository tests: {error}");
    }

    Some(pool)
}

/// Returns a name that does not collide with earlier runs on a shared database.
pub(crate) fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Inserts a department row and returns its identifier.
pub(crate) async fn insert_department(pool: &PgPool, name: &str) -> Uuid {
    let slug = unique_name("dept");
    let inserted = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO departments (name, slug)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(slug)
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(id) => id,
        Err(error) => panic!("failed to insert test department: {error}"),
    }
}
