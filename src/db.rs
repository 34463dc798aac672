use sqlx::{postgres::PgPoolOptions, PgPool};

/// Owns the Postgres connection pool.
///
/// Constructed once at process start and handed into `AppState`; nothing in
/// the crate holds a module-level pool.
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        // Fail fast on an unreachable database
        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }
}
