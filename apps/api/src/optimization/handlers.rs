//! Axum route handlers for the Optimization API.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::optimization::rewriter::{ResumeRewriter, RewriteSource};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub resume_text: String,
    pub jd_text: String,
    /// Usually the `missing` list of a prior score report.
    #[serde(default)]
    pub missing: BTreeSet<String>,
    #[serde(default)]
    pub use_llm: bool,
    /// Per-request credential. Overrides the configured one for this call only.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub optimized_text: String,
    pub source: RewriteSource,
    pub generation_available: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/optimize
///
/// Rewrites the resume toward the job description. Never fails once the input
/// validates: generation problems fall back to the template rewrite.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let rewriter = match request.api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => session_rewriter(&state, key)?,
        _ => state.rewriter.as_ref().clone(),
    };

    let outcome = rewriter
        .rewrite(
            &request.resume_text,
            &request.jd_text,
            &request.missing,
            request.use_llm,
        )
        .await;

    Ok(Json(OptimizeResponse {
        optimized_text: outcome.text,
        source: outcome.source,
        generation_available: rewriter.generation_available(),
    }))
}

/// Rewriter backed by a client built from a caller-supplied credential.
fn session_rewriter(state: &AppState, api_key: &str) -> Result<ResumeRewriter, AppError> {
    let client = LlmClient::new(
        api_key.to_string(),
        state.config.groq_model.clone(),
        Duration::from_secs(state.config.llm_timeout_secs),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to build LLM client: {e}")))?;

    Ok(ResumeRewriter::new(Some(Arc::new(client))))
}
