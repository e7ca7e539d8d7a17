use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::config::env_bool;

fn pool_options() -> PgPoolOptions {
    let max_connections = std::env::var("JOBBOARD_DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(4)
        .clamp(1, 32);

    let acquire_timeout_secs = std::env::var("JOBBOARD_DB_ACQUIRE_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(10)
        .clamp(1, 60);

    let disable_jit = env_bool("JOBBOARD_DISABLE_JIT").unwrap_or(true);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                // listing reads are small; JIT planning only adds latency
                if disable_jit {
                    sqlx::query("SET jit = OFF").execute(&mut *conn).await?;
                }
                Ok(())
            })
        })
}

pub async fn make_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = pool_options().connect(database_url).await?;
    Ok(pool)
}

/// Pool that defers connecting until the first query.
///
/// The server uses this so it can start (and serve fallback pages) while the
/// database is still unreachable.
pub fn make_lazy_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = pool_options().connect_lazy(database_url)?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
