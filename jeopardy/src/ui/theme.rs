//! Color theme and styling for the board TUI

use ratatui::style::{Color, Modifier, Style};

/// Board UI color theme
#[derive(Debug, Clone)]
pub struct BoardTheme {
    // Base colors
    pub board: Color,
    pub border: Color,
    pub border_selected: Color,

    // Cell text colors
    pub header_text: Color,
    pub hidden_text: Color,
    pub question_text: Color,
    pub answer_text: Color,
    pub unavailable_text: Color,

    // Status colors
    pub status_text: Color,
    pub loading_text: Color,
    pub notice_text: Color,
}

impl Default for BoardTheme {
    fn default() -> Self {
        Self {
            board: Color::Blue,
            border: Color::DarkGray,
            border_selected: Color::Yellow,

            header_text: Color::White,
            hidden_text: Color::Yellow,
            question_text: Color::White,
            answer_text: Color::LightGreen,
            unavailable_text: Color::DarkGray,

            status_text: Color::Gray,
            loading_text: Color::Cyan,
            notice_text: Color::LightRed,
        }
    }
}

impl BoardTheme {
    /// Get style for category titles
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_text)
            .bg(self.board)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for a cell still showing its glyph
    pub fn hidden_style(&self) -> Style {
        Style::default()
            .fg(self.hidden_text)
            .bg(self.board)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for a cell showing its question
    pub fn question_style(&self) -> Style {
        Style::default().fg(self.question_text).bg(self.board)
    }

    /// Get style for a cell showing its answer
    pub fn answer_style(&self) -> Style {
        Style::default()
            .fg(self.answer_text)
            .bg(self.board)
            .add_modifier(Modifier::ITALIC)
    }

    /// Get style for cells of a category that failed to load
    pub fn unavailable_style(&self) -> Style {
        Style::default()
            .fg(self.unavailable_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get border style based on selection
    pub fn border_style(&self, selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(self.border_selected)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.status_text)
    }

    pub fn loading_style(&self) -> Style {
        Style::default()
            .fg(self.loading_text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn notice_style(&self) -> Style {
        Style::default().fg(self.notice_text)
    }
}
