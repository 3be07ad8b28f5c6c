//! Layout calculation for the board TUI.
//!
//! The same layout is used for drawing and for mapping mouse clicks back to
//! cells, so a click always lands on the cell that was drawn there.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    pub title_area: Rect,
    pub header_cells: Vec<Rect>,
    /// Body cells indexed `[row][col]`.
    pub body_cells: Vec<Vec<Rect>>,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl BoardLayout {
    /// Split `area` into a title line, a `cols` x `rows` grid under a
    /// header row, a status line, and a hotkey line.
    pub fn calculate(area: Rect, cols: usize, rows: usize) -> Self {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(3),    // Board
                Constraint::Length(1), // Status
                Constraint::Length(1), // Hotkeys
            ])
            .split(area);

        let board_area = outer[1];
        let (header_cells, body_cells) = if cols == 0 {
            (Vec::new(), Vec::new())
        } else {
            let mut row_constraints = vec![Constraint::Length(3)];
            row_constraints.extend((0..rows).map(|_| Constraint::Fill(1)));

            let row_areas = Layout::default()
                .direction(Direction::Vertical)
                .constraints(row_constraints)
                .split(board_area);

            let split_cols = |row: Rect| -> Vec<Rect> {
                Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints((0..cols).map(|_| Constraint::Fill(1)))
                    .split(row)
                    .to_vec()
            };

            let header = split_cols(row_areas[0]);
            let body = row_areas.iter().skip(1).map(|r| split_cols(*r)).collect();
            (header, body)
        };

        Self {
            title_area: outer[0],
            header_cells,
            body_cells,
            status_bar: outer[2],
            hotkey_bar: outer[3],
        }
    }

    /// The body cell under a screen position, as `(row, col)`.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        self.body_cells.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|rect| {
                    x >= rect.x
                        && x < rect.x + rect.width
                        && y >= rect.y
                        && y < rect.y + rect.height
                })
                .map(|col| (row, col))
        })
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
