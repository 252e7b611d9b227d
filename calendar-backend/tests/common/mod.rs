#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use calendar_backend::infrastructure::database::run_migrations;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Pool against `DATABASE_URL` with migrations applied, or `None` when no
/// database is configured for this run.
pub async fn pool() -> Option<PgPool> {
    pool_with(PgPoolOptions::new().max_connections(4)).await
}

/// Pool holding a single connection; acquiring while it is checked out
/// fails after a short timeout.
pub async fn single_connection_pool() -> Option<PgPool> {
    pool_with(
        PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(2)),
    )
    .await
}

async fn pool_with(options: PgPoolOptions) -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping database test");
        return None;
    };
    let pool = options
        .connect(&url)
        .await
        .expect("failed to connect to DATABASE_URL");
    run_migrations(&pool).await.expect("failed to run migrations");
    Some(pool)
}

/// Address no other test run has used.
pub fn unique_email(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix}-{}-{stamp}-{n}@example.com", std::process::id())
}
