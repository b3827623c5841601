//! Key handling: crossterm key events to selector [`Input`]s

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::Input;

/// Translate a key press into a selector input. Key releases and unbound
/// keys yield `None`.
#[must_use]
pub fn key_to_input(key: KeyEvent) -> Option<Input> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    map_key(key.code, key.modifiers)
}

/// Translate a key code plus modifiers into a selector input
#[must_use]
pub const fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Input> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c' | 'd') => Some(Input::Cancel),
            KeyCode::Char('p' | 'k') => Some(Input::Up),
            KeyCode::Char('n' | 'j') => Some(Input::Down),
            _ => None,
        };
    }

    match code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Input::Cancel),
        KeyCode::Enter => Some(Input::Enter),
        KeyCode::Up | KeyCode::BackTab => Some(Input::Up),
        KeyCode::Down | KeyCode::Tab => Some(Input::Down),
        KeyCode::Backspace => Some(Input::Backspace),
        KeyCode::Char(c) => Some(Input::Char(c)),
        _ => None,
    }
}
