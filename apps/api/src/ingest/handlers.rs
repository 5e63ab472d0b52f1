//! Axum route handlers for the Ingestion API.

use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::ingest::fields::ResumeFields;
use crate::ingest::parser::{extract_document, DocumentFormat};

const UPLOAD_FIELD: &str = "file";
const DEFAULT_FILE_NAME: &str = "resume.txt";

pub const SAMPLE_RESUME: &str = "John Doe\n\
Senior Data Scientist\n\
john.doe@example.com | +1-555-123-4567 | San Francisco, CA\n\
\n\
Experience\n\
- Led ML projects using Python, Pandas, NumPy, Scikit-learn, and TensorFlow.\n\
- Built REST APIs with Docker and Kubernetes on AWS.\n\
- Collaborated in Agile teams, improving deployment via MLOps.\n";

pub const SAMPLE_JOB_DESCRIPTION: &str = "We are seeking a Senior Machine Learning Engineer with strong Python, SQL, \
TensorFlow/PyTorch experience. Responsibilities include building microservices, \
developing REST APIs, and deploying on AWS or GCP. Agile and communication skills required.";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub text: String,
    pub fields: ResumeFields,
    pub format: DocumentFormat,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SampleResponse {
    pub resume_text: &'static str,
    pub fields: ResumeFields,
    pub jd_text: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/parse
///
/// Multipart upload with a `file` field (.txt, .pdf or .docx). Extraction is
/// best-effort; unreadable documents come back as warnings with empty text.
pub async fn handle_parse_resume(mut multipart: Multipart) -> Result<Json<ParseResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read upload: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or(DEFAULT_FILE_NAME).to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::UnprocessableEntity(format!("Could not read upload: {e}")))?;

        info!("Parsing uploaded resume '{file_name}' ({} bytes)", bytes.len());

        // PDF/DOCX decoding is CPU-bound.
        let extraction = tokio::task::spawn_blocking(move || extract_document(&file_name, &bytes))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
            })?;

        let fields = ResumeFields::extract(&extraction.text);
        return Ok(Json(ParseResponse {
            text: extraction.text,
            fields,
            format: extraction.format,
            warnings: extraction.warnings,
        }));
    }

    Err(AppError::Validation(format!(
        "multipart body must contain a '{UPLOAD_FIELD}' field"
    )))
}

/// GET /api/v1/sample
///
/// Canned resume and job description for trying the service out.
pub async fn handle_sample() -> Json<SampleResponse> {
    Json(SampleResponse {
        resume_text: SAMPLE_RESUME,
        fields: ResumeFields::extract(SAMPLE_RESUME),
        jd_text: SAMPLE_JOB_DESCRIPTION,
    })
}
