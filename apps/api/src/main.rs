mod auth;
mod config;
mod db;
mod errors;
mod forms;
mod llm_client;
mod models;
mod resume;
mod routes;
mod state;
mod store;
mod views;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::session::session_layer;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config).await?;
    let store = Arc::new(PgStore::new(pool));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.completion_api_url.clone(),
        Duration::from_secs(config.completion_timeout_secs),
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    info!("Resume batch policy: {}", config.batch_policy);

    let sessions = session_layer(&config);

    // Build app state
    let state = AppState {
        store,
        completion: Arc::new(llm),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state, sessions).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
