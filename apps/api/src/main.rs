mod analysis;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod profile;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::profile::store::PgRecordStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Upwork Buddy API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize the model client once; requests share it
    let generator: Option<Arc<dyn TextGenerator>> =
        match GeminiClient::new(config.gemini_api_key.clone()) {
            Ok(client) => {
                info!("Gemini client initialized (model: {})", llm_client::MODEL);
                Some(Arc::new(client))
            }
            Err(e) => {
                warn!("Gemini client unavailable, analysis requests will return 503: {e}");
                None
            }
        };

    let state = AppState {
        generator,
        store: Arc::new(PgRecordStore::new(db)),
    };

    // The browser extension calls in from page origins
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
