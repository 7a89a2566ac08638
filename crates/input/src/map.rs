//! Key mapping from terminal events to game inputs and app commands.

use crate::types::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Everything a key press can mean while a game is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(InputEvent),
    /// Discard the running game and start a new one (not recorded).
    Restart,
    /// Back to the login screen.
    ChangePlayer,
    Quit,
}

/// Map keyboard input to a command. Key releases are ignored.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(Command::Quit);
    }

    let event = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            InputEvent::MoveLeft
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            InputEvent::MoveRight
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            InputEvent::MoveDown
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => InputEvent::Rotate,
        KeyCode::Char('z') | KeyCode::Char('Z') => InputEvent::RotateCcw,

        // Actions
        KeyCode::Char(' ') => InputEvent::HardDrop,
        KeyCode::Char('p') | KeyCode::Char('P') => InputEvent::TogglePause,
        KeyCode::Char('b') | KeyCode::Char('B') => InputEvent::ShowLeaderboard,

        // App
        KeyCode::Char('r') | KeyCode::Char('R') => return Some(Command::Restart),
        KeyCode::Char('n') | KeyCode::Char('N') => return Some(Command::ChangePlayer),

        _ => return None,
    };
    Some(Command::Game(event))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return key.code == KeyCode::Char('c');
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
}
