//! Document export: revised resume text → PDF or DOCX bytes.

pub mod docx;
pub mod handlers;
pub mod headings;
pub mod metrics;
pub mod pdf;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("DOCX rendering failed: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "optimized_resume.pdf",
            ExportFormat::Docx => "optimized_resume.docx",
        }
    }
}

pub fn export_document(text: &str, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Pdf => pdf::render_pdf(text),
        ExportFormat::Docx => docx::render_docx(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_deserializes_lowercase() {
        let format: ExportFormat = serde_json::from_str(r#""docx""#).unwrap();
        assert_eq!(format, ExportFormat::Docx);
        assert!(serde_json::from_str::<ExportFormat>(r#""rtf""#).is_err());
    }

    #[test]
    fn test_export_dispatches_by_format() {
        let pdf = export_document("Experience", ExportFormat::Pdf).unwrap();
        let docx = export_document("Experience", ExportFormat::Docx).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(docx.starts_with(b"PK"));
    }
}
