// ABOUTME: Paginated document rendering for generated workout plans
// ABOUTME: Page-writer abstraction, a minimal PDF writer and the plan layout renderer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Rendering
//!
//! [`PlanRenderer`] owns the layout (cursor, indentation, page breaks) and
//! talks to a [`PageWriter`], which only knows how to place text and start
//! pages. [`PdfPageWriter`] turns those commands into a PDF 1.4 document;
//! [`RecordingPageWriter`] keeps them in memory for inspection.

/// Page-writer trait and the in-memory recording writer
pub mod page_writer;
/// Minimal single-font PDF writer
pub mod pdf;
/// Plan layout and file output
pub mod renderer;

pub use page_writer::{DrawCommand, PageWriter, RecordingPageWriter};
pub use pdf::PdfPageWriter;
pub use renderer::{
    leaf_line, pdf_file_name, render_plan_pdf, render_plan_to_file, PageLayout, PlanRenderer,
};
