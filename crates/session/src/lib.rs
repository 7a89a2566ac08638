//! Session module - player identity, game runs and the leaderboard
//!
//! - [`SessionManager`] authenticates players against a credential store
//!   (registering unknown names on first use), binds a player to a fresh
//!   [`GameState`](tetris_arcade_core::GameState) and records the finished
//!   game in the history store.
//! - [`Leaderboard`] is a read-only ranking over the history store: one best
//!   entry per player, highest score first.
//!
//! Stores are passed in explicitly; nothing here touches a global.
//!
//! # Example
//!
//! ```
//! use tetris_arcade_session::{AuthOutcome, SessionManager};
//! use tetris_arcade_store::{MemoryCredentialStore, MemoryHistoryStore};
//!
//! let mut sessions = SessionManager::new(MemoryCredentialStore::new(), MemoryHistoryStore::new());
//!
//! let outcome = sessions.authenticate("Ada", "x1").unwrap();
//! assert!(matches!(outcome, AuthOutcome::Registered(_)));
//! assert!(sessions.authenticate("Ada", "wrong").is_err());
//! ```

pub mod error;
pub mod leaderboard;
pub mod manager;

pub use tetris_arcade_core as core;
pub use tetris_arcade_store as store;

pub use error::SessionError;
pub use leaderboard::{rank_best, Leaderboard, Standing};
pub use manager::{
    validate_name, AuthOutcome, RecordOutcome, Session, SessionManager, SessionSummary,
    MAX_NAME_LEN,
};
