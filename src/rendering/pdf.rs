// ABOUTME: Minimal PDF 1.4 writer producing US Letter pages of Helvetica text
// ABOUTME: Implements the page-writer trait and serializes objects, xref table and trailer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! PDF output
//!
//! Object layout: `1` catalog, `2` page tree, `3` font, then for page `i`
//! (zero-based) the page object `4 + 2i` and its content stream `5 + 2i`.
//! Text is limited to printable ASCII; other characters are written as `?`.

use super::page_writer::PageWriter;
use crate::errors::{AppError, AppResult};

/// US Letter width in points
pub const PAGE_WIDTH: f32 = 612.0;
/// US Letter height in points
pub const PAGE_HEIGHT: f32 = 792.0;
/// Font size in points
pub const FONT_SIZE: f32 = 12.0;

const FIRST_PAGE_OBJECT: usize = 4;

/// Page writer accumulating one content stream per page
#[derive(Debug)]
pub struct PdfPageWriter {
    pages: Vec<String>,
}

impl Default for PdfPageWriter {
    fn default() -> Self {
        Self {
            pages: vec![String::new()],
        }
    }
}

impl PdfPageWriter {
    /// Create a writer positioned on an empty first page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages started so far
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize the document
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        let page_count = self.pages.len();
        let mut out = String::from("%PDF-1.4\n");
        let mut offsets: Vec<usize> = Vec::with_capacity(3 + 2 * page_count);

        let kids = (0..page_count)
            .map(|i| format!("{} 0 R", FIRST_PAGE_OBJECT + 2 * i))
            .collect::<Vec<_>>()
            .join(" ");

        offsets.push(out.len());
        out.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        offsets.push(out.len());
        out.push_str(&format!(
            "2 0 obj\n<< /Type /Pages /Kids [{kids}] /Count {page_count} >>\nendobj\n"
        ));

        offsets.push(out.len());
        out.push_str(
            "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n",
        );

        for (i, content) in self.pages.iter().enumerate() {
            let page_id = FIRST_PAGE_OBJECT + 2 * i;
            let content_id = page_id + 1;

            offsets.push(out.len());
            out.push_str(&format!(
                "{page_id} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>\nendobj\n"
            ));

            offsets.push(out.len());
            out.push_str(&format!(
                "{content_id} 0 obj\n<< /Length {} >>\nstream\n{content}endstream\nendobj\n",
                content.len()
            ));
        }

        let xref_offset = out.len();
        let object_count = offsets.len() + 1;
        out.push_str(&format!("xref\n0 {object_count}\n0000000000 65535 f \n"));
        for offset in &offsets {
            out.push_str(&format!("{offset:010} 00000 n \n"));
        }
        out.push_str(&format!(
            "trailer\n<< /Size {object_count} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        ));

        out.into_bytes()
    }
}

impl PageWriter for PdfPageWriter {
    fn draw_text(&mut self, x: f32, y: f32, text: &str) -> AppResult<()> {
        if !x.is_finite() || !y.is_finite() {
            return Err(AppError::render(format!(
                "invalid text position ({x}, {y})"
            )));
        }
        let page = self
            .pages
            .last_mut()
            .ok_or_else(|| AppError::render("no current page"))?;
        page.push_str(&format!(
            "BT /F1 {FONT_SIZE} Tf {x} {y} Td ({}) Tj ET\n",
            escape_text(text)
        ));
        Ok(())
    }

    fn new_page(&mut self) -> AppResult<()> {
        self.pages.push(String::new());
        Ok(())
    }
}

/// Escape a string for a PDF literal
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            ' '..='~' => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}
