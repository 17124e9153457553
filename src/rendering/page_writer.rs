// ABOUTME: Page-writer abstraction accepting positioned text and page breaks
// ABOUTME: Includes an in-memory implementation that records every draw command
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;

/// Sink for positioned text on fixed-size pages
///
/// Coordinates are PDF points with the origin at the bottom-left corner.
pub trait PageWriter {
    /// Draw `text` with its baseline starting at (`x`, `y`) on the current page
    ///
    /// # Errors
    ///
    /// Returns a render error if the writer cannot place the text
    fn draw_text(&mut self, x: f32, y: f32, text: &str) -> AppResult<()>;

    /// Finish the current page and start a new one
    ///
    /// # Errors
    ///
    /// Returns a render error if the writer cannot start a page
    fn new_page(&mut self) -> AppResult<()>;
}

/// One recorded page-writer call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `draw_text` call
    Text {
        /// Horizontal position
        x: f32,
        /// Vertical position
        y: f32,
        /// Drawn text
        text: String,
    },
    /// `new_page` call
    NewPage,
}

/// Page writer that records commands in memory
#[derive(Debug, Default)]
pub struct RecordingPageWriter {
    commands: Vec<DrawCommand>,
}

impl RecordingPageWriter {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands in call order
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of pages touched, counting the initial page
    #[must_use]
    pub fn page_count(&self) -> usize {
        1 + self
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::NewPage))
            .count()
    }

    /// Drawn text lines in call order
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                DrawCommand::NewPage => None,
            })
            .collect()
    }
}

impl PageWriter for RecordingPageWriter {
    fn draw_text(&mut self, x: f32, y: f32, text: &str) -> AppResult<()> {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_owned(),
        });
        Ok(())
    }

    fn new_page(&mut self) -> AppResult<()> {
        self.commands.push(DrawCommand::NewPage);
        Ok(())
    }
}
