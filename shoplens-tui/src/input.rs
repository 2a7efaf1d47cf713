//! Keyboard input dispatch: overlays → global keys → range controls.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

const WEEK: i64 = 7;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::RangeEntry => {
            handle_range_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(panel) = c.to_digit(10).and_then(|d| Panel::from_index(d as usize - 1)) {
                app.active_panel = panel;
            }
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
        }
        KeyCode::BackTab => app.active_panel = app.active_panel.prev(),

        // 3. Date range controls, available on every panel.
        KeyCode::Char('[') => app.move_start(-1),
        KeyCode::Char(']') => app.move_start(1),
        KeyCode::Char('{') => app.move_end(-1),
        KeyCode::Char('}') => app.move_end(1),
        KeyCode::Char('<') => app.shift_range(-WEEK),
        KeyCode::Char('>') => app.shift_range(WEEK),
        KeyCode::Char('r') => app.reset_range(),
        KeyCode::Char('/') => {
            app.range_input = app.range.to_string();
            app.overlay = Overlay::RangeEntry;
        }
        _ => {}
    }
}

fn handle_range_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.range_input.clear();
        }
        KeyCode::Enter => {
            app.overlay = Overlay::None;
            app.apply_range_input();
        }
        KeyCode::Backspace => {
            app.range_input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' || c == '.' => {
            app.range_input.push(c);
        }
        _ => {}
    }
}
