//! Session manager - login, game runs and result recording.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use tetris_arcade_core::{GameState, KickPolicy};
use tetris_arcade_store::{CredentialStore, HistoryStore, PlayerRecord, ScoreEntry, StoreError};

use crate::error::SessionError;
use crate::leaderboard::Leaderboard;

/// Longest accepted player name, in characters.
pub const MAX_NAME_LEN: usize = 32;

/// Trim a player name and check it is usable as a store key.
pub fn validate_name(name: &str) -> Result<&str, SessionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SessionError::InvalidName("name is empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(SessionError::InvalidName("name is longer than 32 characters"));
    }
    if name.chars().any(char::is_control) {
        return Err(SessionError::InvalidName("name contains control characters"));
    }
    Ok(name)
}

/// Successful login, carrying the normalized player name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The name was unknown and has been registered with this password.
    Registered(String),
    /// The name exists and the password matched.
    Verified(String),
}

impl AuthOutcome {
    pub fn player(&self) -> &str {
        match self {
            AuthOutcome::Registered(name) | AuthOutcome::Verified(name) => name,
        }
    }

    pub fn registered(&self) -> bool {
        matches!(self, AuthOutcome::Registered(_))
    }
}

/// What happened to a finished game's record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Written to the history store (along with any older pending entries).
    Saved,
    /// The store failed; the entry is queued in memory for a later retry.
    Deferred { pending: usize, reason: String },
}

/// One player's game run.
#[derive(Debug, Clone)]
pub struct Session {
    player: String,
    game: GameState,
    started: Instant,
    finished: bool,
}

impl Session {
    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whether the result has already been recorded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Final numbers of a session, kept in memory even if persisting fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub player: String,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub duration: Duration,
    pub played_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn to_entry(&self) -> ScoreEntry {
        ScoreEntry::new(self.player.clone(), self.score, self.played_at).with_stats(
            self.lines,
            self.level,
            self.duration.as_millis() as u64,
        )
    }
}

/// Binds players to game runs over explicit credential and history stores.
#[derive(Debug)]
pub struct SessionManager<C, H> {
    credentials: C,
    history: H,
    pending: VecDeque<ScoreEntry>,
}

impl<C: CredentialStore, H: HistoryStore> SessionManager<C, H> {
    pub fn new(credentials: C, history: H) -> Self {
        Self {
            credentials,
            history,
            pending: VecDeque::new(),
        }
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn leaderboard(&self) -> Leaderboard<'_, H> {
        Leaderboard::new(&self.history)
    }

    /// Whether `name` already has a credential record.
    pub fn is_registered(&self, name: &str) -> Result<bool, SessionError> {
        let name = validate_name(name)?;
        Ok(self.credentials.find(name)?.is_some())
    }

    /// Log in, registering the name on first use.
    ///
    /// Repeated calls with a correct pair only read the credential store.
    pub fn authenticate(&mut self, name: &str, password: &str) -> Result<AuthOutcome, SessionError> {
        let name = validate_name(name)?;
        if password.is_empty() {
            return Err(SessionError::EmptyPassword);
        }

        match self.credentials.find(name)? {
            Some(record) if record.verify(password) => {
                debug!(player = %name, "player verified");
                Ok(AuthOutcome::Verified(name.to_string()))
            }
            Some(_) => {
                info!(player = %name, "rejected login");
                Err(SessionError::Auth(name.to_string()))
            }
            None => {
                self.credentials.insert(PlayerRecord::new(name, password))?;
                info!(player = %name, "registered new player");
                Ok(AuthOutcome::Registered(name.to_string()))
            }
        }
    }

    /// Start a new game for an authenticated player.
    pub fn start(&self, player: &str, seed: u32, kick_policy: KickPolicy) -> Session {
        info!(player = %player, seed, "session started");
        Session {
            player: player.to_string(),
            game: GameState::with_kick_policy(seed, kick_policy),
            started: Instant::now(),
            finished: false,
        }
    }

    /// Record the session's result. Returns `None` if it was already recorded.
    pub fn finish(&mut self, session: &mut Session) -> Option<(SessionSummary, RecordOutcome)> {
        if session.finished {
            return None;
        }
        session.finished = true;

        let game = &session.game;
        let summary = SessionSummary {
            player: session.player.clone(),
            score: game.score(),
            lines: game.lines(),
            level: game.level(),
            duration: session.elapsed(),
            played_at: Utc::now(),
        };
        info!(
            player = %summary.player,
            score = summary.score,
            lines = summary.lines,
            level = summary.level,
            duration_ms = summary.duration.as_millis() as u64,
            "session finished"
        );

        let outcome = self.record_result(summary.to_entry());
        Some((summary, outcome))
    }

    /// Append a score entry, flushing older pending entries first.
    ///
    /// A storage failure is not fatal: the entry is queued and a warning logged.
    pub fn record_result(&mut self, entry: ScoreEntry) -> RecordOutcome {
        self.pending.push_back(entry);
        match self.flush_pending() {
            Ok(_) => RecordOutcome::Saved,
            Err(err) => {
                warn!(
                    error = %err,
                    pending = self.pending.len(),
                    "could not persist score, keeping it for retry"
                );
                RecordOutcome::Deferred {
                    pending: self.pending.len(),
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Retry queued entries in order. Stops at the first failure.
    pub fn flush_pending(&mut self) -> Result<usize, StoreError> {
        let mut written = 0;
        while let Some(entry) = self.pending.front() {
            self.history.append(entry)?;
            debug!(player = %entry.name, score = entry.score, "score persisted");
            self.pending.pop_front();
            written += 1;
        }
        Ok(written)
    }

    /// Entries waiting to be persisted, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &ScoreEntry> {
        self.pending.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
