use std::sync::Arc;

use crate::config::Config;
use crate::optimization::rewriter::ResumeRewriter;
use crate::scoring::semantic::SimilarityEstimator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Shared TF-IDF estimator. Holds the similarity cache, so one instance per process.
    pub estimator: Arc<SimilarityEstimator>,
    /// Generation-backed rewriter with template fallback.
    pub rewriter: Arc<ResumeRewriter>,
}
