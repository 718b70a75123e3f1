mod config;
mod corpus;
mod errors;
mod extract;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::corpus::CorpusStore;
use crate::routes::build_router;
use crate::scoring::scorer_for;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Doability API v{}", env!("CARGO_PKG_VERSION"));

    // Download the curriculum reference corpus into the local cache.
    // A retrieval failure aborts startup: scoring never runs against a
    // partial curriculum.
    let client = reqwest::Client::new();
    let corpus = Arc::new(CorpusStore::new(&config.curriculum_dir, client));
    corpus.ensure_all().await?;

    // Initialize the doability scorer (FrequencyScorer by default — swap via SCORING_BACKEND)
    let scorer = scorer_for(config.scoring_backend);
    info!("Scorer initialized (backend: {:?})", config.scoring_backend);

    // Build app state
    let state = AppState { corpus, scorer };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
