// Main entry point for the editorial gateway

use std::time::Duration;

use anyhow::{Context, Result};
use editorial_core::kernel::scheduled_tasks::start_scheduler;
use editorial_core::server::{build_app, AppState};
use editorial_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,editorial_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting editorial gateway");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        integrations = ?config.configured_integrations(),
        "Configuration loaded"
    );
    if config.gateway_secret.is_none() {
        tracing::warn!("GATEWAY_SECRET not set, signed gateway functions will reject every call");
    }

    let state = AppState::from_config(&config);

    // Periodic Feedly sync (optional)
    let _scheduler = match config.feedly.as_ref().and_then(|f| f.sync_cron.as_deref()) {
        Some(cron) => Some(
            start_scheduler(state.deps.clone(), cron)
                .await
                .context("Failed to start scheduler")?,
        ),
        None => None,
    };

    let app = build_app(state, Duration::from_secs(config.request_timeout_secs));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
