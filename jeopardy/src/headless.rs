//! Headless mode for the board.
//!
//! A line-oriented front end for scripted play and automated testing. The
//! board is printed as text with each cell's id, and every input line is
//! either a cell id to click or a `#` command.

use jeopardy_core::{
    AbortReason, BoardController, CategorySource, ClickOutcome, GameConfig, MemorySurface,
    RevealState, StartOutcome, Table,
};
use std::io::{self, BufRead, Write};

/// What the input loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A board session driven by text lines.
pub struct HeadlessSession<S> {
    controller: BoardController<S>,
    surface: MemorySurface,
}

impl<S: CategorySource> HeadlessSession<S> {
    pub fn new(source: S, config: GameConfig) -> Self {
        Self {
            controller: BoardController::new(source, config),
            surface: MemorySurface::with_label("Start"),
        }
    }

    /// Start (or restart) a game and print the outcome.
    pub async fn start<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.controller.start_game(&mut self.surface).await {
            StartOutcome::Started {
                categories,
                unavailable,
            } => {
                writeln!(
                    out,
                    "[STARTED] {categories} categories, {unavailable} unavailable"
                )?;
                self.print_board(out)?;
            }
            StartOutcome::Aborted(reason) => {
                let notice = match (&reason, self.surface.last_notice()) {
                    (_, Some(notice)) => notice.to_string(),
                    (AbortReason::NoCategories, None) => "No categories available.".to_string(),
                    (AbortReason::IdsUnavailable(e), None) => e.clone(),
                };
                writeln!(out, "[ABORTED] {notice}")?;
            }
        }
        Ok(())
    }

    /// Handle one input line.
    pub async fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        if let Some(command) = line.strip_prefix('#') {
            match command.split_whitespace().next() {
                Some("quit") | Some("exit") => {
                    writeln!(out, "Goodbye!")?;
                    return Ok(Flow::Quit);
                }
                Some("start") | Some("restart") => self.start(out).await?,
                Some("board") => self.print_board(out)?,
                Some("json") => {
                    let json = serde_json::to_string_pretty(self.controller.board())
                        .map_err(io::Error::other)?;
                    writeln!(out, "{json}")?;
                }
                Some("help") => print_help(out)?,
                _ => writeln!(out, "[ERROR] Unknown command. Type #help for help.")?,
            }
            return Ok(Flow::Continue);
        }

        match self.controller.on_cell_click(line, &mut self.surface) {
            ClickOutcome::Revealed { cell, state } => {
                let rendered = cell.to_string();
                let text = self.surface.cell_text(&rendered).unwrap_or_default();
                writeln!(out, "[REVEALED] {cell} ({}): {text}", state_name(state))?;
            }
            ClickOutcome::Unchanged(cell) => {
                writeln!(out, "[UNCHANGED] {cell} already shows its answer")?;
            }
            ClickOutcome::NotFound(e) => writeln!(out, "[NOT FOUND] {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn print_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.surface.table() {
            Some(table) => write!(out, "{}", format_table(table)),
            None => writeln!(out, "[ERROR] No board yet. Type #start."),
        }
    }
}

/// Run the game in headless mode over stdin/stdout.
pub async fn run_headless<S: CategorySource>(source: S, config: GameConfig) -> io::Result<()> {
    let mut session = HeadlessSession::new(source, config);
    let mut stdout = io::stdout();

    println!("=== Jeopardy Headless Mode ===");
    print_help(&mut stdout)?;
    println!();

    session.start(&mut stdout).await?;
    stdout.flush()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let flow = session.handle_line(&line, &mut stdout).await?;
        stdout.flush()?;
        if flow == Flow::Quit {
            break;
        }
    }

    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "[HELP]")?;
    writeln!(out, "  <cell-id>  - Click a cell (e.g. science-0)")?;
    writeln!(out, "  #start     - Start a new game")?;
    writeln!(out, "  #board     - Show the board")?;
    writeln!(out, "  #json      - Dump the board as JSON")?;
    writeln!(out, "  #help      - Show this help")?;
    writeln!(out, "  #quit      - Exit")
}

fn state_name(state: RevealState) -> &'static str {
    match state {
        RevealState::Hidden => "hidden",
        RevealState::Question => "question",
        RevealState::Answer => "answer",
    }
}

/// Lay a table out as aligned text, one `id: text` entry per cell.
pub fn format_table(table: &Table) -> String {
    let entries: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| format!("{}: {}", c.id, c.text)).collect())
        .collect();

    let widths: Vec<usize> = (0..table.width())
        .map(|col| {
            let header = table.header[col].chars().count();
            entries
                .iter()
                .filter_map(|row| row.get(col))
                .map(|e| e.chars().count())
                .fold(header, usize::max)
        })
        .collect();

    let format_row = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    let mut text = format_row(&table.header);
    text.push('\n');
    text.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    text.push('\n');
    for row in &entries {
        text.push_str(&format_row(row));
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use jeopardy_core::{CategoryId, Clue, ScriptedSource};

    fn science_session() -> HeadlessSession<ScriptedSource> {
        let source = ScriptedSource::new()
            .with_clues(
                CategoryId(1),
                "Science",
                vec![Clue::new("What is H2O?", "Water")],
            )
            .with_clues(
                CategoryId(2),
                "Sports",
                vec![Clue::new("Sport with a puck?", "Hockey")],
            );
        let config = GameConfig::default()
            .with_categories(2)
            .with_clues_per_category(1);
        HeadlessSession::new(source, config)
    }

    async fn run_lines(session: &mut HeadlessSession<ScriptedSource>, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            session.handle_line(line, &mut out).await.unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_start_prints_board() {
        let mut session = science_session();
        let out = run_lines(&mut session, &["#start"]).await;

        assert!(out.starts_with("[STARTED] 2 categories, 0 unavailable\n"));
        assert!(out.contains("Science"));
        assert!(out.contains("science-0: ?"));
        assert!(out.contains("sports-0: ?"));
    }

    #[tokio::test]
    async fn test_click_sequence() {
        let mut session = science_session();
        let out = run_lines(
            &mut session,
            &["#start", "science-0", "science-0", "science-0", "nope-0"],
        )
        .await;

        assert!(out.contains("[REVEALED] science-0 (question): What is H2O?"));
        assert!(out.contains("[REVEALED] science-0 (answer): Water"));
        assert!(out.contains("[UNCHANGED] science-0"));
        assert!(out.contains("[NOT FOUND]"));
    }

    #[tokio::test]
    async fn test_reply_uses_rendered_cell_text() {
        let mut session = science_session();
        let out = run_lines(&mut session, &["#start", "  science-0  ", "science-00"]).await;

        assert!(out.contains("[REVEALED] science-0 (question): What is H2O?"));
        assert!(out.contains("[NOT FOUND] "));
        assert!(!out.contains("(answer)"));
    }

    #[tokio::test]
    async fn test_aborted_start() {
        let mut session = HeadlessSession::new(
            ScriptedSource::generated(2, 1).failing_ids(),
            GameConfig::default(),
        );
        let out = run_lines(&mut session, &["#start", "#board"]).await;

        assert!(out.starts_with("[ABORTED] Could not start a new game"));
        assert!(out.contains("[ERROR] No board yet."));
    }

    #[tokio::test]
    async fn test_json_dump() {
        let mut session = science_session();
        let out = run_lines(&mut session, &["#start", "science-0"]).await;
        let mut json = Vec::new();
        session.handle_line("#json", &mut json).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        let dumped = value.to_string();
        assert!(dumped.contains("What is H2O?"));
        assert!(dumped.contains("\"question\""));
        assert!(out.contains("[REVEALED]"));
    }

    #[tokio::test]
    async fn test_quit_and_unknown_command() {
        let mut session = science_session();
        let mut out = Vec::new();
        assert_eq!(
            session.handle_line("#bogus", &mut out).await.unwrap(),
            Flow::Continue
        );
        assert_eq!(
            session.handle_line("#quit", &mut out).await.unwrap(),
            Flow::Quit
        );
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("[ERROR] Unknown command."));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_format_table_alignment() {
        use jeopardy_core::TableCell;

        let cell = |id: &str, text: &str| TableCell {
            id: id.to_string(),
            text: text.to_string(),
        };
        let table = Table {
            header: vec!["Science".to_string(), "Art".to_string()],
            rows: vec![vec![cell("science-0", "?"), cell("art-0", "Who painted it?")]],
        };

        let text = format_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Science      | Art");
        assert_eq!(lines[2], "science-0: ? | art-0: Who painted it?");
        assert_eq!(lines[1].len(), lines[2].len());
    }
}
