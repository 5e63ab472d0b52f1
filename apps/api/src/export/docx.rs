use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};

use crate::export::headings::{heading_text, is_heading};
use crate::export::ExportError;

const HEADING_STYLE_ID: &str = "Heading2";
/// docx-rs sizes are half-points.
const BODY_SIZE_HALF_PT: usize = 20;
const HEADING_SIZE_HALF_PT: usize = 26;

/// One paragraph per input line. Heading lines get the "Heading 2" style,
/// everything else is a 10pt body run (blank lines included).
pub fn render_docx(text: &str) -> Result<Vec<u8>, ExportError> {
    let heading_style = Style::new(HEADING_STYLE_ID, StyleType::Paragraph)
        .name("Heading 2")
        .size(HEADING_SIZE_HALF_PT)
        .bold();

    let docx = text.lines().fold(Docx::new().add_style(heading_style), |docx, line| {
        let paragraph = if is_heading(line) {
            Paragraph::new()
                .add_run(Run::new().add_text(heading_text(line)))
                .style(HEADING_STYLE_ID)
        } else {
            Paragraph::new().add_run(Run::new().add_text(line).size(BODY_SIZE_HALF_PT))
        };
        docx.add_paragraph(paragraph)
    });

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;
    Ok(buf.into_inner())
}
