//! Persistence module - player credentials and game history
//!
//! Two flat local stores, each behind a small trait so the session layer
//! receives explicit handles instead of reaching for a global:
//!
//! - [`CredentialStore`]: keyed by player name, holds a salted password hash.
//!   Read on every login, written once on first registration.
//! - [`HistoryStore`]: append-only log of [`ScoreEntry`] records, one per
//!   finished game, read back for the leaderboard.
//!
//! Both have a file-backed implementation (JSON array / JSON lines under the
//! data directory) and an in-memory one for tests.
//!
//! # Files
//!
//! | File | Format |
//! |------|--------|
//! | `users.json` | JSON array of [`PlayerRecord`] |
//! | `history.jsonl` | one [`ScoreEntry`] JSON object per line |
//! | `tetris.log` | log output of the binary |

pub mod credentials;
pub mod error;
pub mod history;
pub mod paths;

pub use credentials::{
    hash_password, CredentialStore, JsonCredentialStore, MemoryCredentialStore, PlayerRecord,
};
pub use error::StoreError;
pub use history::{HistoryStore, JsonlHistoryStore, MemoryHistoryStore, ScoreEntry};
pub use paths::DataDir;
