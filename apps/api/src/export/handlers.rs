//! Axum route handlers for the Export API.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::{export_document, ExportFormat};

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub text: String,
    pub format: ExportFormat,
}

/// POST /api/v1/export
///
/// Renders the text as a downloadable document.
pub async fn handle_export(Json(request): Json<ExportRequest>) -> Result<Response, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let format = request.format;
    let bytes = tokio::task::spawn_blocking(move || export_document(&request.text, format))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))?
        .map_err(|e| AppError::Internal(e.into()))?;

    info!("Exported {:?} document ({} bytes)", format, bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        bytes,
    )
        .into_response())
}
