//! The presentation surface the controller writes to.
//!
//! A surface is a table with one header row and addressable body cells,
//! plus a loading indicator and a place to post notices. Front ends own a
//! surface and draw it; the controller never reads from one.

use serde::Serialize;

/// One addressable body cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCell {
    /// Rendered cell id, `<slug>-<index>`.
    pub id: String,
    /// Text currently displayed.
    pub text: String,
}

/// The board as drawn: a header row and rows of body cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    /// Number of columns, taken from the header row.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// All body cells, row by row.
    pub fn body_cells(&self) -> impl Iterator<Item = &TableCell> {
        self.rows.iter().flatten()
    }

    pub fn cell(&self, id: &str) -> Option<&TableCell> {
        self.body_cells().find(|c| c.id == id)
    }

    pub fn cell_mut(&mut self, id: &str) -> Option<&mut TableCell> {
        self.rows.iter_mut().flatten().find(|c| c.id == id)
    }

    /// Cell at a row/column position.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// State of the loading indicator and the start control's label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LoadingView {
    pub visible: bool,
    pub label: String,
}

/// Something the controller can render a board onto.
pub trait Surface {
    /// Throw away the current table and show `table` instead.
    fn replace_table(&mut self, table: Table);

    /// Change the text of one body cell. Returns false if no cell has that id.
    fn set_cell_text(&mut self, cell_id: &str, text: &str) -> bool;

    /// Update the loading indicator and start-control label.
    fn set_loading(&mut self, loading: LoadingView);

    /// Show a user-visible notice.
    fn notify(&mut self, notice: &str);
}

/// In-memory surface. Front ends draw from it; tests inspect it.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    table: Option<Table>,
    loading: LoadingView,
    notices: Vec<String>,
    renders: usize,
    cell_writes: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface whose start control shows `label` before the first game.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            loading: LoadingView {
                visible: false,
                label: label.into(),
            },
            ..Self::default()
        }
    }

    /// The rendered table, if a board has been rendered.
    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn loading(&self) -> &LoadingView {
        &self.loading
    }

    pub fn is_loading(&self) -> bool {
        self.loading.visible
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&str> {
        self.notices.last().map(String::as_str)
    }

    /// Text of a body cell.
    pub fn cell_text(&self, cell_id: &str) -> Option<&str> {
        self.table
            .as_ref()
            .and_then(|t| t.cell(cell_id))
            .map(|c| c.text.as_str())
    }

    /// How many times a table has been rendered.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// How many individual cell updates have been applied.
    pub fn cell_write_count(&self) -> usize {
        self.cell_writes
    }
}

impl Surface for MemorySurface {
    fn replace_table(&mut self, table: Table) {
        self.table = Some(table);
        self.renders += 1;
    }

    fn set_cell_text(&mut self, cell_id: &str, text: &str) -> bool {
        let Some(cell) = self.table.as_mut().and_then(|t| t.cell_mut(cell_id)) else {
            return false;
        };
        cell.text = text.to_string();
        self.cell_writes += 1;
        true
    }

    fn set_loading(&mut self, loading: LoadingView) {
        self.loading = loading;
    }

    fn notify(&mut self, notice: &str) {
        self.notices.push(notice.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> Table {
        Table {
            header: vec!["Science".into(), "Sports".into()],
            rows: vec![vec![
                TableCell {
                    id: "science-0".into(),
                    text: "?".into(),
                },
                TableCell {
                    id: "sports-0".into(),
                    text: "?".into(),
                },
            ]],
        }
    }

    #[test]
    fn test_table_lookup() {
        let table = small_table();
        assert_eq!(table.width(), 2);
        assert_eq!(table.body_cells().count(), 2);
        assert_eq!(table.cell_at(0, 1).unwrap().id, "sports-0");
        assert!(table.cell("history-0").is_none());
        assert!(table.cell_at(1, 0).is_none());
    }

    #[test]
    fn test_memory_surface_writes() {
        let mut surface = MemorySurface::with_label("Start");
        assert!(!surface.set_cell_text("science-0", "x"));
        assert_eq!(surface.loading().label, "Start");

        surface.replace_table(small_table());
        assert!(surface.set_cell_text("science-0", "What is H2O?"));
        assert!(!surface.set_cell_text("history-0", "x"));

        assert_eq!(surface.cell_text("science-0"), Some("What is H2O?"));
        assert_eq!(surface.cell_text("sports-0"), Some("?"));
        assert_eq!(surface.render_count(), 1);
        assert_eq!(surface.cell_write_count(), 1);
    }

    #[test]
    fn test_memory_surface_replace_clears() {
        let mut surface = MemorySurface::new();
        surface.replace_table(small_table());
        surface.set_cell_text("science-0", "revealed");

        surface.replace_table(small_table());
        assert_eq!(surface.cell_text("science-0"), Some("?"));
        assert_eq!(surface.render_count(), 2);
    }
}
