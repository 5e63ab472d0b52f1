pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::ingest::handlers as ingest;
use crate::optimization::handlers as optimization;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

/// Upload cap for resume documents (axum defaults to 2 MB).
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Ingestion
        .route("/api/v1/sample", get(ingest::handle_sample))
        .route(
            "/api/v1/resume/parse",
            post(ingest::handle_parse_resume).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Scoring
        .route("/api/v1/score", post(scoring::handle_score))
        // Optimization
        .route("/api/v1/optimize", post(optimization::handle_optimize))
        // Export
        .route("/api/v1/export", post(export::handle_export))
        .with_state(state)
}
