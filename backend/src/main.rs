//! Backend entry-point: loads settings, applies migrations, and serves the
//! task API until shutdown.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use task_backend::inbound::http::health::HealthState;
use task_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use task_backend::settings::AppSettings;

fn init_tracing(settings: &AppSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_directive()));
    let result = if settings.debug {
        fmt().with_env_filter(filter).try_init()
    } else {
        fmt().with_env_filter(filter).json().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

async fn apply_migrations(database_url: String) -> std::io::Result<()> {
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(std::io::Error::other)?
        .map_err(std::io::Error::other)?;
    info!(applied, "database schema up to date");
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = AppSettings::from_env().map_err(std::io::Error::other)?;
    init_tracing(&settings);

    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let allowed_origins = settings
        .allowed_origins()
        .map_err(std::io::Error::other)?;
    apply_migrations(settings.database_url().to_owned()).await?;

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url()).with_max_size(settings.db_max_connections()),
    )
    .await
    .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, pool.clone())
        .with_allowed_origins(allowed_origins);
    info!(bind_addr = %config.bind_addr(), "starting task service");
    let result = create_server(health_state.clone(), config)?.await;

    health_state.mark_unhealthy();
    drop(pool);
    info!("task service stopped");
    result
}
