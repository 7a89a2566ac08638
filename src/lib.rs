//! Tetris Arcade (workspace facade crate).
//!
//! Game rules live in `core`, persistence in `store`, login and leaderboard
//! in `session`, key mapping in `input` and drawing in `term`. This crate
//! re-exports them and adds the pieces the binary is built from: command line
//! options ([`cli`]) and the login form state machine ([`login`]).

pub mod cli;
pub mod login;

pub use tetris_arcade_core as core;
pub use tetris_arcade_input as input;
pub use tetris_arcade_session as session;
pub use tetris_arcade_store as store;
pub use tetris_arcade_term as term;
pub use tetris_arcade_types as types;
