use jobboard::api;
use jobboard::config;
use jobboard::db;
use jobboard::listings::{ListingService, ListingsRepo};
use jobboard::pages::PageCache;

use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jobboard::telemetry::init_tracing();

    let cfg = config::Config::from_env()?;

    info!(
        listen_addr = cfg.listen_addr.as_deref().unwrap_or("disabled"),
        query_timeout_ms = cfg.query_timeout.as_millis() as u64,
        revalidate_secs = cfg.revalidate.as_secs(),
        migrate_on_startup = cfg.migrate_on_startup,
        "board-server starting"
    );

    let Some(addr) = cfg.listen_addr.clone() else {
        warn!("listen address disabled; nothing to serve");
        return Ok(());
    };

    // Lazy: pages must render from fallbacks even if the database is down at boot.
    let pool = db::make_lazy_pool(&cfg.database_url)?;
    if cfg.migrate_on_startup {
        db::run_migrations(&pool).await?;
        info!("migrations applied");
    }

    let state = api::ApiState {
        listings: ListingService::new(ListingsRepo::new(pool), cfg.query_timeout),
        pages: Arc::new(PageCache::new(cfg.revalidate)),
    };
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listing api listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("board-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
