mod api;
mod bootstrap;
mod health;

use std::path::Path;

use anyhow::Result;
use axum::Router;
use agronova_core::config::{AppConfig, LoadOptions};
use agronova_db::DbPool;
use tower_http::cors::CorsLayer;

fn init_logging(config: &AppConfig) {
    use agronova_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

/// API and health routes behind one CORS layer.
fn app_router(state: api::AppState, static_dir: &Path, db_pool: DbPool) -> Router {
    api::router(state, static_dir).merge(health::router(db_pool)).layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    let router = app_router(app.state(), &app.config.server.static_dir, app.db_pool.clone());

    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        static_dir = %app.config.server.static_dir.display(),
        crops = app.catalog.len(),
        "agronova-server listening"
    );

    axum::serve(listener, router).with_graceful_shutdown(wait_for_shutdown()).await?;

    tracing::info!(
        event_name = "system.server.stopping",
        correlation_id = "shutdown",
        "agronova-server stopping"
    );
    app.db_pool.close().await;

    Ok(())
}

async fn wait_for_shutdown() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(
            event_name = "system.server.signal_error",
            correlation_id = "shutdown",
            error = %error,
            "failed to listen for shutdown signal"
        );
    }
}
