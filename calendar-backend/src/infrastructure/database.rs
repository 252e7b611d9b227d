use sqlx::{Connection, PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::infrastructure::config::AppConfig;

pub async fn create_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.database_url)
        .await?;
    info!("connected to PostgreSQL");
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("running database migrations");
    sqlx::migrate!().run(pool).await?;
    info!("migrations completed");
    Ok(())
}

/// What the connectivity check saw on the other end of a pooled connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReport {
    pub product: String,
    pub server_version: String,
    pub database: String,
    pub select_one: i32,
    pub public_tables: i64,
}

/// Borrows one connection from the pool, pings it and runs a few trivial
/// queries. The connection goes back to the pool when this returns.
pub async fn check_connection(pool: &PgPool) -> Result<ConnectionReport, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    conn.ping().await?;

    let server_version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(&mut *conn)
        .await?;
    let database: String = sqlx::query_scalar("SELECT current_database()::text")
        .fetch_one(&mut *conn)
        .await?;
    let select_one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&mut *conn).await?;
    let public_tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'public'",
    )
    .fetch_one(&mut *conn)
    .await?;

    let report = ConnectionReport {
        product: product_name(&server_version).to_string(),
        server_version,
        database,
        select_one,
        public_tables,
    };
    info!(
        product = %report.product,
        database = %report.database,
        public_tables = report.public_tables,
        "database connection verified"
    );
    Ok(report)
}

fn product_name(version: &str) -> &str {
    version.split_whitespace().next().unwrap_or_default()
}
