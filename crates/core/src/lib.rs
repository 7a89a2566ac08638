//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules and state machine. It has **no
//! dependencies** on terminal I/O or persistence, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Boards and active pieces can be built directly for fixtures
//! - **Portable**: Can run headless, in the terminal front end, or in benches
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with bounds/occupancy checks, commit and line clearing
//! - [`piece`]: Tetromino shape tables, the active [`Piece`] and rotation kick policy
//! - [`game_state`]: The engine: gravity, input handling, locking, scoring, lifecycle
//! - [`rng`]: Seeded 7-bag piece queue
//! - [`scoring`]: Pure scoring, level and gravity policy
//! - [`snapshot`]: Read-only render snapshot
//!
//! # Example
//!
//! ```
//! use tetris_arcade_core::GameState;
//! use tetris_arcade_types::InputEvent;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply(InputEvent::MoveRight);
//! game.apply(InputEvent::Rotate);
//! game.apply(InputEvent::HardDrop);
//!
//! // Hard drop awards points for every row travelled
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::advance`](game_state::GameState::advance) every frame
//! with the elapsed milliseconds; it runs one gravity step each time the
//! level's interval has passed (500ms at level 1, 40ms faster per level,
//! never below 80ms).

pub mod board;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_arcade_types as types;

pub use board::{Board, ClearedRows, CommitError};
pub use game_state::{GameState, LockEvent, TickOutcome};
pub use piece::{get_shape, KickPolicy, Piece, PieceCells, PieceShape};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{drop_score, gravity_interval_ms, level_for_lines, line_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
