// ABOUTME: Lays out a workout plan as indented text lines across paginated output
// ABOUTME: Tracks the vertical cursor, breaks pages at the bottom margin and writes PDF files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::page_writer::PageWriter;
use super::pdf::PdfPageWriter;
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, ExerciseLeaf, WorkoutPlan};

const TITLE: &str = "Workout Plan";

/// Positions and spacing used by [`PlanRenderer`], in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// Title x
    pub title_x: f32,
    /// Title baseline
    pub title_y: f32,
    /// First line baseline on the first page
    pub start_y: f32,
    /// Distance between baselines
    pub line_height: f32,
    /// First line baseline on continuation pages
    pub top_margin: f32,
    /// Lowest baseline before a page break
    pub bottom_margin: f32,
    /// Section header indentation
    pub section_x: f32,
    /// Leaf and group header indentation
    pub item_x: f32,
    /// Group member indentation
    pub group_item_x: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            title_x: 100.0,
            title_y: 750.0,
            start_y: 730.0,
            line_height: 15.0,
            top_margin: 750.0,
            bottom_margin: 50.0,
            section_x: 100.0,
            item_x: 110.0,
            group_item_x: 120.0,
        }
    }
}

/// Renders a plan onto a [`PageWriter`]
pub struct PlanRenderer<'w, W: PageWriter> {
    writer: &'w mut W,
    layout: PageLayout,
    cursor_y: f32,
}

impl<'w, W: PageWriter> PlanRenderer<'w, W> {
    /// Create a renderer with the given layout
    pub fn new(writer: &'w mut W, layout: PageLayout) -> Self {
        Self {
            writer,
            cursor_y: layout.start_y,
            layout,
        }
    }

    /// Current baseline
    #[must_use]
    pub const fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    /// Draw the title followed by every section
    ///
    /// # Errors
    ///
    /// Propagates any page-writer failure
    pub fn render(&mut self, plan: &WorkoutPlan) -> AppResult<()> {
        self.writer
            .draw_text(self.layout.title_x, self.layout.title_y, TITLE)?;
        self.cursor_y = self.layout.start_y;

        for section in plan.sections() {
            self.line(self.layout.section_x, &format!("{}:", section.section))?;
            for exercise in &section.exercises {
                match exercise {
                    Exercise::Leaf(leaf) => self.line(self.layout.item_x, &leaf_line(leaf))?,
                    Exercise::Group(group) => {
                        self.line(self.layout.item_x, &format!("{}:", group.name))?;
                        for leaf in &group.exercises {
                            self.line(self.layout.group_item_x, &leaf_line(leaf))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn line(&mut self, x: f32, text: &str) -> AppResult<()> {
        self.writer.draw_text(x, self.cursor_y, text)?;
        self.cursor_y -= self.layout.line_height;
        if self.cursor_y < self.layout.bottom_margin {
            self.writer.new_page()?;
            self.cursor_y = self.layout.top_margin;
        }
        Ok(())
    }
}

/// Text of one exercise line
///
/// Sets and reps win over duration, which wins over the free-text details.
#[must_use]
pub fn leaf_line(leaf: &ExerciseLeaf) -> String {
    let suffix = match (leaf.sets, leaf.reps) {
        (Some(sets), Some(reps)) => Some(format!("{sets} sets x {reps} reps")),
        _ => leaf.duration.clone().or_else(|| leaf.details.clone()),
    };
    match suffix {
        Some(suffix) => format!("- {}, {suffix}", leaf.name),
        None => format!("- {}", leaf.name),
    }
}

/// Render a plan to PDF bytes with the default layout
///
/// # Errors
///
/// Returns a render error if layout fails
pub fn render_plan_pdf(plan: &WorkoutPlan) -> AppResult<Vec<u8>> {
    let mut writer = PdfPageWriter::new();
    PlanRenderer::new(&mut writer, PageLayout::default()).render(plan)?;
    debug!(pages = writer.page_count(), "Plan laid out");
    Ok(writer.finish())
}

/// Render a plan and write it to `dir/file_name`, creating `dir` if needed
///
/// # Errors
///
/// Returns a render error if layout or any file operation fails
pub async fn render_plan_to_file(
    plan: &WorkoutPlan,
    dir: &Path,
    file_name: &str,
) -> AppResult<PathBuf> {
    info!("Generating PDF: {}", file_name);
    let bytes = render_plan_pdf(plan)?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::render(format!("cannot create {}: {e}", dir.display())))?;

    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::render(format!("cannot write {}: {e}", path.display())))?;

    info!("PDF generated at: {}", path.display());
    Ok(path)
}

/// `workout_<user>_<UTC %Y%m%d%H%M%S>.pdf` with a path-safe user segment
#[must_use]
pub fn pdf_file_name(user_name: &str, timestamp: DateTime<Utc>) -> String {
    let user: String = user_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("workout_{user}_{}.pdf", timestamp.format("%Y%m%d%H%M%S"))
}
