mod accounts;
mod ai;
mod auth;
mod config;
mod dashboard;
mod db;
mod errors;
mod gemini;
mod linkedin;
mod models;
mod posts;
mod routes;
mod scheduler;
mod settings;
mod state;

use std::net::SocketAddr;

use anyhow::Result;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::gemini::GeminiClient;
use crate::linkedin::LinkedInClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Crosspost API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize the Gemini client
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_temperature,
        config.gemini_max_tokens,
    );
    info!("Gemini client initialized (model: {})", gemini.model());

    // Initialize the LinkedIn client
    let linkedin = LinkedInClient::new(config.linkedin.clone());
    info!("LinkedIn client initialized");

    // Build app state
    let state = AppState {
        db,
        gemini,
        linkedin,
        config: config.clone(),
    };

    // Background publisher for due scheduled posts
    scheduler::spawn(state.clone());

    // Only the configured frontend origin may call the API from a browser.
    let cors = CorsLayer::new()
        .allow_origin(config.frontend_url.parse::<HeaderValue>()?)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
