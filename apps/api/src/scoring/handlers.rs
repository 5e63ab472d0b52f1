//! Axum route handlers for the Scoring API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::scoring::catalog::load_catalog;
use crate::scoring::report::{score_resume, ScoreReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub jd_text: String,
}

/// POST /api/v1/score
///
/// Scores a resume against a job description. The catalog is re-read on every
/// request so keyword files can be edited without a restart.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreReport>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let keywords_dir = state.config.keywords_dir.clone();
    let estimator = state.estimator.clone();
    let weights = state.config.weights;

    // Catalog I/O and TF-IDF are CPU/disk bound; keep them off the executor.
    let report = tokio::task::spawn_blocking(move || {
        let catalog = load_catalog(&keywords_dir);
        score_resume(
            &request.resume_text,
            &request.jd_text,
            &catalog,
            &estimator,
            &weights,
        )
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in scoring: {e}")))?;

    Ok(Json(report))
}
