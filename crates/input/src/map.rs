//! Key mapping from terminal events to player inputs.

use crate::types::{Key, PlayerInput};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical key bound to a terminal key code.
pub fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Down => Some(Key::SoftDrop),
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Some(Key::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Key::RotateCcw),
        _ => None,
    }
}

/// Map a keyboard event to a player input.
///
/// Repeat events return None.
pub fn map_key_event(event: KeyEvent) -> Option<PlayerInput> {
    let key = key_for(event.code)?;
    match event.kind {
        KeyEventKind::Press => Some(PlayerInput::Press(key)),
        KeyEventKind::Release => Some(PlayerInput::Release(key)),
        KeyEventKind::Repeat => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
