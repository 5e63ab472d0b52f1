mod config;
mod errors;
mod export;
mod ingest;
mod llm_client;
mod optimization;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::optimization::rewriter::ResumeRewriter;
use crate::routes::build_router;
use crate::scoring::cache::LruSimilarityCache;
use crate::scoring::semantic::SimilarityEstimator;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Optimizer API v{}", env!("CARGO_PKG_VERSION"));

    // Similarity estimator (capacity 0 disables the cache)
    let estimator = match LruSimilarityCache::with_capacity(config.similarity_cache_capacity) {
        Some(cache) => {
            info!(
                "Similarity cache enabled (capacity {})",
                config.similarity_cache_capacity
            );
            SimilarityEstimator::new(Box::new(cache))
        }
        None => SimilarityEstimator::uncached(),
    };

    // Generation client, only when a credential is configured
    let generator: Option<Arc<dyn TextGenerator>> = match &config.groq_api_key {
        Some(key) => {
            let client = LlmClient::new(
                key.clone(),
                config.groq_model.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )?;
            info!("LLM client initialized (model: {})", config.groq_model);
            Some(Arc::new(client))
        }
        None => {
            warn!("GROQ_API_KEY not set; optimization will use the template rewrite");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        estimator: Arc::new(estimator),
        rewriter: Arc::new(ResumeRewriter::new(generator)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the UI host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
