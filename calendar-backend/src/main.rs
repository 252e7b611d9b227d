use calendar_backend::infrastructure::config::AppConfig;
use calendar_backend::infrastructure::database::{check_connection, create_pool, run_migrations};
use calendar_backend::infrastructure::logging::init_logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config).await?;
    run_migrations(&pool).await?;

    let report = check_connection(&pool).await?;
    if report.product != "PostgreSQL" {
        anyhow::bail!("expected a PostgreSQL server, found {}", report.server_version);
    }

    info!(
        database = %report.database,
        tables = report.public_tables,
        "calendar backend ready"
    );

    pool.close().await;
    Ok(())
}
