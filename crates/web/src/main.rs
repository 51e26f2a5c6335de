use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

use bot::gateway::LoggingGateway;
use bot::payments::create_provider;
use bot::{Engine, EngineOptions};
use storage::InMemoryRowStore;

mod config;
mod console;
mod error;
mod features;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting championship registration service");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        row_store_id = %config.row_store_id,
        admins = config.admin_user_ids.len(),
        provider = %config.payment_provider,
        "Configuration loaded successfully"
    );

    // The spreadsheet client and the real chat transport live outside
    // this service; local runs use the in-memory store, the logging
    // gateway and the stdin console.
    let store = Arc::new(InMemoryRowStore::new());
    let gateway = Arc::new(LoggingGateway);
    let payments = create_provider(
        &config.payment_provider,
        &config.webhook_secret,
        &config.base_public_url,
    )
    .context("Failed to initialize payment provider")?;

    let engine = Arc::new(Engine::new(
        store,
        gateway,
        payments,
        EngineOptions {
            admin_ids: config.admin_user_ids.clone(),
            webhook_secret: config.webhook_secret.clone(),
            base_public_url: config.base_public_url.clone(),
            http_addr: config.http_addr.clone(),
        },
    ));

    let (events_tx, events_rx) = mpsc::channel(64);
    console::spawn(events_tx);
    let engine_loop = engine.clone();
    tokio::spawn(async move { engine_loop.run(events_rx).await });

    let app = app(AppState {
        engine,
        webhook_secret: config.webhook_secret.clone(),
        base_public_url: config.base_public_url.clone(),
    });

    let bind_address = config.bind_addr();
    tracing::info!("Starting server at http://{}", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .merge(features::payments::routes::routes())
        .merge(features::export::routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install ctrl-c handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
