/// Keyboard → game input mapping.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::entities::{Direction, Input};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Game(Input),
    Quit,
    Ignore,
}

/// Arrows / WASD move, Space restarts, Q / Esc / Ctrl-C quit.
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            KeyAction::Game(Input::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            KeyAction::Game(Input::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            KeyAction::Game(Input::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            KeyAction::Game(Input::Move(Direction::Down))
        }
        KeyCode::Char(' ') => KeyAction::Game(Input::Restart),
        _ => KeyAction::Ignore,
    }
}
