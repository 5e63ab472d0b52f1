// Document ingestion: bytes in, best-effort text plus contact fields out.
// Extraction failures become warnings, never errors.
pub mod fields;
pub mod handlers;
pub mod parser;
