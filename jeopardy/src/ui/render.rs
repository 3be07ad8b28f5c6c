//! Render orchestration for the board TUI

use jeopardy_core::{RevealState, Table};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::layout::{centered_rect_fixed, BoardLayout};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let (rows, cols) = app.grid_size();
    let layout = BoardLayout::calculate(frame.area(), cols, rows);

    render_title_bar(frame, app, layout.title_area);

    match app.surface.table() {
        Some(table) => render_board(frame, app, table, &layout),
        None => render_empty_board(frame, app, &layout),
    }

    render_status_bar(frame, app, layout.status_bar);
    render_hotkey_bar(frame, app, layout.hotkey_bar);

    if app.show_help {
        render_help_overlay(frame, app, frame.area());
    }
}

/// Render the title bar, including the loading indicator while it is up
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " JEOPARDY! ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if app.is_loading() {
        spans.push(Span::styled(
            format!(" {} ", app.start_label()),
            app.theme.loading_style(),
        ));
    } else {
        spans.push(Span::styled(
            format!(" [r] {} ", app.start_label()),
            app.theme.status_style(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_board(frame: &mut Frame, app: &App, table: &Table, layout: &BoardLayout) {
    for (title, area) in table.header.iter().zip(&layout.header_cells) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.border_style(false));
        let header = Paragraph::new(title.as_str())
            .style(app.theme.header_style())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(header, *area);
    }

    for (row, (cells, areas)) in table.rows.iter().zip(&layout.body_cells).enumerate() {
        for (col, (cell, area)) in cells.iter().zip(areas).enumerate() {
            let style = match app.cell_state(&cell.id) {
                Some(RevealState::Hidden) => app.theme.hidden_style(),
                Some(RevealState::Question) => app.theme.question_style(),
                Some(RevealState::Answer) => app.theme.answer_style(),
                None => app.theme.unavailable_style(),
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.border_style(app.selected == (row, col)));
            let paragraph = Paragraph::new(cell.text.as_str())
                .style(style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(paragraph, *area);
        }
    }
}

/// Shown before the first game has loaded, or after a start was abandoned
fn render_empty_board(frame: &mut Frame, app: &App, layout: &BoardLayout) {
    let (text, style) = if app.is_loading() {
        (app.start_label().to_string(), app.theme.loading_style())
    } else {
        (
            format!("Press r to {}", app.start_label().to_lowercase()),
            app.theme.status_style(),
        )
    };

    let area = centered_rect_fixed(40, 3, board_area(layout));
    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// The region between the title and status lines.
fn board_area(layout: &BoardLayout) -> Rect {
    let top = layout.title_area.y + layout.title_area.height;
    Rect::new(
        layout.title_area.x,
        top,
        layout.title_area.width,
        layout.status_bar.y.saturating_sub(top),
    )
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.status_message() {
        Some(message) => Line::from(Span::styled(message, app.theme.status_style())),
        None => match app.surface.last_notice() {
            Some(notice) => Line::from(Span::styled(notice, app.theme.notice_style())),
            None => Line::from(""),
        },
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the hotkey bar
fn render_hotkey_bar(frame: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, app.theme.loading_style());
    let label = |l: &'static str| Span::styled(l, app.theme.status_style());

    let line = Line::from(vec![
        key(" ←↑↓→"),
        label(" move  "),
        key("Enter"),
        label(" reveal  "),
        key("r"),
        label(" restart  "),
        key("?"),
        label(" help  "),
        key("q"),
        label(" quit"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(46, 16, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            " Jeopardy - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Board:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  h/j/k/l or arrows   Move selection"),
        Line::from("  Enter or Space      Reveal question, then answer"),
        Line::from("  Mouse click         Reveal the clicked clue"),
        Line::from(""),
        Line::from(Span::styled(
            "Game:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  r/s     Start a new game"),
        Line::from("  q       Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use jeopardy_core::{CategoryId, GameConfig, ScriptedSource};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(app: &mut App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        app.viewport = Rect::new(0, 0, 120, 40);
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
    }

    #[tokio::test]
    async fn test_render_before_start() {
        let mut app = App::new(Box::new(ScriptedSource::new()), GameConfig::default());
        let text = screen_text(&draw(&mut app));
        assert!(text.contains("JEOPARDY!"));
        assert!(text.contains("Loading..."));
        assert!(!text.contains("[r]"));
    }

    #[tokio::test]
    async fn test_render_after_empty_start() {
        let mut app = App::new(Box::new(ScriptedSource::new()), GameConfig::default());
        app.start_game().await;
        let text = screen_text(&draw(&mut app));
        assert!(text.contains("Press r to restart game"));
        assert!(text.contains("[r] Restart Game"));
    }

    #[tokio::test]
    async fn test_render_board_and_reveal() {
        let source = ScriptedSource::new()
            .with_category(CategoryId(1), "Science", 2)
            .with_category(CategoryId(2), "Sports", 2);
        let config = GameConfig::default()
            .with_categories(2)
            .with_clues_per_category(2);
        let mut app = App::new(Box::new(source), config);
        app.start_game().await;
        app.click_selected();

        let terminal = draw(&mut app);
        let text = screen_text(&terminal);
        assert!(text.contains("Science"));
        assert!(text.contains("Sports"));
        assert!(text.contains("Science question 1"));
        assert!(text.contains("[r] Restart Game"));
    }

    #[tokio::test]
    async fn test_render_help_overlay() {
        let mut app = App::new(Box::new(ScriptedSource::new()), GameConfig::default());
        app.toggle_help();
        let terminal = draw(&mut app);
        assert!(screen_text(&terminal).contains("Jeopardy - Help"));
    }
}
