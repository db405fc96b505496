//! Bookshelf Server - book catalogue REST API
//!
//! Starts the HTTP listener; everything else is configuration.

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf_server::{
    api,
    config::{AppConfig, DEFAULT_JWT_SECRET},
    repository::Repository,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config);

    tracing::info!("Starting Bookshelf Server v{}", env!("CARGO_PKG_VERSION"));
    if config.auth.jwt_secret == DEFAULT_JWT_SECRET {
        tracing::warn!("Using the default JWT secret; set JWT_SECRET in production");
    }

    let repository = Repository::from_config(&config)
        .await
        .context("Failed to open book store")?;

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState::new(config, repository);
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("bookshelf_server={},tower_http=debug", config.logging.level).into()
    });

    let (pretty, json) = if config.logging.format == "json" {
        (None, Some(tracing_subscriber::fmt::layer().json()))
    } else {
        (Some(tracing_subscriber::fmt::layer()), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::warn!("Received Ctrl+C, shutting down");
}
