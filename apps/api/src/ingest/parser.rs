//! Best-effort text extraction from uploaded resume documents.
//!
//! Each reader returns `Result<_, IngestError>`; `extract_document` turns a
//! failure into a warning and empty text so the caller can still respond.
//! PDFs that the whole-document pass rejects are retried page by page, and
//! only the pages that fail are dropped.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const NO_TEXT_WARNING: &str = "No text could be extracted from the uploaded file.";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("PDF reader aborted on malformed input")]
    PdfPanicked,

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Chosen from the file extension, case-insensitively. Unknown → plain text.
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            DocumentFormat::Pdf
        } else if lower.ends_with(".docx") {
            DocumentFormat::Docx
        } else {
            DocumentFormat::PlainText
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentFormat::PlainText => "text",
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub text: String,
    pub format: DocumentFormat,
    pub warnings: Vec<String>,
}

pub fn extract_document(file_name: &str, bytes: &[u8]) -> Extraction {
    let format = DocumentFormat::from_file_name(file_name);
    let mut warnings = Vec::new();

    let result = match format {
        DocumentFormat::PlainText => Ok(read_plain_text(bytes)),
        DocumentFormat::Pdf => read_pdf(bytes).map(|(text, skipped)| {
            warnings.extend(skipped);
            text
        }),
        DocumentFormat::Docx => read_docx(bytes),
    };

    let text = result.unwrap_or_else(|e| {
        warn!("Could not extract text from '{file_name}': {e}");
        warnings.push(e.to_string());
        String::new()
    });

    if text.trim().is_empty() {
        warnings.push(NO_TEXT_WARNING.to_string());
    }
    debug!("Extracted {} chars from {format} upload", text.len());

    Extraction {
        text,
        format,
        warnings,
    }
}

/// UTF-8 with undecodable bytes dropped.
fn read_plain_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace(char::REPLACEMENT_CHARACTER, "")
}

/// Text plus one warning per page that had to be skipped.
fn read_pdf(bytes: &[u8]) -> Result<(String, Vec<String>), IngestError> {
    // pdf-extract panics on some malformed inputs.
    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => return Ok((text, Vec::new())),
        Ok(Err(e)) => debug!("Whole-document PDF extraction failed ({e}); retrying per page"),
        Err(_) => debug!("Whole-document PDF extraction aborted; retrying per page"),
    }

    let doc = panic::catch_unwind(AssertUnwindSafe(|| lopdf::Document::load_mem(bytes)))
        .map_err(|_| IngestError::PdfPanicked)?
        .map_err(|e| IngestError::Pdf(e.to_string()))?;

    let pages = doc
        .get_pages()
        .into_keys()
        .map(|number| (number, read_pdf_page(&doc, number)))
        .collect();
    Ok(join_pages(pages))
}

fn read_pdf_page(doc: &lopdf::Document, number: u32) -> Result<String, IngestError> {
    panic::catch_unwind(AssertUnwindSafe(|| doc.extract_text(&[number])))
        .map_err(|_| IngestError::PdfPanicked)?
        .map_err(|e| IngestError::Pdf(e.to_string()))
}

/// Pages that produced text, joined by `\n` in page order. Each failed page
/// is logged and reported as a warning instead.
fn join_pages(pages: Vec<(u32, Result<String, IngestError>)>) -> (String, Vec<String>) {
    let mut texts = Vec::with_capacity(pages.len());
    let mut skipped = Vec::new();
    for (number, page) in pages {
        match page {
            Ok(text) => texts.push(text),
            Err(e) => {
                warn!("Skipping PDF page {number}: {e}");
                skipped.push(format!("Page {number} skipped: {e}"));
            }
        }
    }
    (texts.join("\n"), skipped)
}

/// Paragraphs joined by `\n`; each paragraph is the concatenation of its runs.
fn read_docx(bytes: &[u8]) -> Result<String, IngestError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| IngestError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(&paragraph.children)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text
}
