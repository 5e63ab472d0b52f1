//! PDF export: A4, Helvetica body, Helvetica-Bold headings, greedy wrap.
//!
//! Layout is planned first (`paginate`) and drawn second, so page breaks and
//! wrapping can be tested without decoding PDF output.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use crate::export::headings::{heading_text, is_heading};
use crate::export::metrics::{get_metrics, PdfFont};
use crate::export::ExportError;

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Page geometry and type sizes. All lengths in millimetres.
#[derive(Debug, Clone, Copy)]
pub struct PageSetup {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub body_size_pt: f32,
    pub heading_size_pt: f32,
    pub line_height_mm: f32,
    pub heading_line_height_mm: f32,
}

pub const A4: PageSetup = PageSetup {
    width_mm: 210.0,
    height_mm: 297.0,
    margin_mm: 15.0,
    body_size_pt: 11.0,
    heading_size_pt: 13.0,
    line_height_mm: 6.0,
    heading_line_height_mm: 8.0,
};

impl PageSetup {
    fn text_width_pt(&self) -> f32 {
        (self.width_mm - 2.0 * self.margin_mm) * PT_PER_MM
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub font: PdfFont,
    /// Baseline, measured from the bottom edge of the page.
    pub y_mm: f32,
}

/// Characters outside Latin-1 become `?`; tabs become four spaces.
pub fn latin1_safe(line: &str) -> String {
    line.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect::<String>()
        .replace('\t', "    ")
}

/// Splits `text` into pages of positioned lines.
pub fn paginate(text: &str, setup: &PageSetup) -> Vec<Vec<PlacedLine>> {
    let max_width_pt = setup.text_width_pt();
    let top = setup.height_mm - setup.margin_mm;

    let mut pages = vec![Vec::new()];
    let mut cursor = top;

    for raw in text.lines() {
        let line = latin1_safe(raw);

        if line.trim().is_empty() {
            cursor -= setup.line_height_mm / 2.0;
            continue;
        }

        let (font, size, advance, content) = if is_heading(&line) {
            let t = heading_text(&line);
            (PdfFont::HelveticaBold, setup.heading_size_pt, setup.heading_line_height_mm, t)
        } else {
            (PdfFont::Helvetica, setup.body_size_pt, setup.line_height_mm, line.as_str())
        };

        for chunk in get_metrics(font).wrap(content, size, max_width_pt) {
            if cursor - advance < setup.margin_mm {
                pages.push(Vec::new());
                cursor = top;
            }
            cursor -= advance;
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    text: chunk,
                    font,
                    y_mm: cursor,
                });
            }
        }
    }

    pages
}

pub fn render_pdf(text: &str) -> Result<Vec<u8>, ExportError> {
    let setup = A4;
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Optimized Resume",
        Mm(setup.width_mm),
        Mm(setup.height_mm),
        "Layer 1",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    for (index, page) in paginate(text, &setup).into_iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(Mm(setup.width_mm), Mm(setup.height_mm), "Layer 1");
            doc.get_page(p).get_layer(l)
        };

        for line in page {
            let (size, font): (f32, &IndirectFontRef) = match line.font {
                PdfFont::Helvetica => (setup.body_size_pt, &regular),
                PdfFont::HelveticaBold => (setup.heading_size_pt, &bold),
            };
            layer.use_text(line.text, size, Mm(setup.margin_mm), Mm(line.y_mm), font);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}
