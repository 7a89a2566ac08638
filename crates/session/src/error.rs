use thiserror::Error;

use tetris_arcade_store::StoreError;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Wrong password for an existing player.
    #[error("wrong password for player `{0}`")]
    Auth(String),

    #[error("invalid player name: {0}")]
    InvalidName(&'static str),

    #[error("a password is required")]
    EmptyPassword,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    pub fn is_auth(&self) -> bool {
        matches!(self, SessionError::Auth(_))
    }
}
