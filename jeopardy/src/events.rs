//! Event handling for the board TUI

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::App;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
    /// A new game was requested; the main loop queues it.
    StartGame,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(width, height) => {
            app.viewport = ratatui::layout::Rect::new(0, 0, width, height);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if !app.show_help => {
            app.click_at(mouse.column, mouse.row);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.show_help {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.toggle_help();
                EventResult::NeedsRedraw
            }
            _ => EventResult::Continue,
        };
    }

    match key.code {
        KeyCode::Char('q') => EventResult::Quit,

        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }

        // Game
        KeyCode::Char('r') | KeyCode::Char('s') => {
            if app.is_loading() {
                EventResult::Continue
            } else {
                EventResult::StartGame
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.click_selected();
            EventResult::NeedsRedraw
        }

        // Navigation
        KeyCode::Char('h') | KeyCode::Left => move_by(app, 0, -1),
        KeyCode::Char('l') | KeyCode::Right => move_by(app, 0, 1),
        KeyCode::Char('k') | KeyCode::Up => move_by(app, -1, 0),
        KeyCode::Char('j') | KeyCode::Down => move_by(app, 1, 0),

        _ => EventResult::Continue,
    }
}

fn move_by(app: &mut App, d_row: isize, d_col: isize) -> EventResult {
    app.move_selection(d_row, d_col);
    EventResult::NeedsRedraw
}
