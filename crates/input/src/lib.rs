//! Terminal input module.
//!
//! Maps `crossterm` key events into game [`InputEvent`](crate::types::InputEvent)s
//! and app-level [`Command`]s, and provides a small line editor for the login
//! prompt. Nothing here touches the terminal itself.

pub mod map;
pub mod text;

pub use tetris_arcade_types as types;

pub use map::{handle_key_event, should_quit, Command};
pub use text::{TextAction, TextField};
