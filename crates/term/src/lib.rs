//! Terminal rendering module.
//!
//! Screens are drawn into a [`FrameBuffer`] by pure view types
//! ([`GameView`], [`LeaderboardView`], [`LoginView`]) and flushed by
//! [`TerminalRenderer`], which only re-emits cells that changed.
//! No widget or layout library is involved; cells are 2 columns wide so the
//! board keeps a square-ish aspect ratio.

pub mod fb;
pub mod game_view;
pub mod leaderboard_view;
pub mod login_view;
pub mod renderer;

pub use tetris_arcade_core as core;
pub use tetris_arcade_session as session;
pub use tetris_arcade_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Hud, Viewport};
pub use leaderboard_view::LeaderboardView;
pub use login_view::{LoginField, LoginPrompt, LoginView};
pub use renderer::TerminalRenderer;
