//! Data directory layout (XDG data dir or ~/.local/share/tetris-arcade).

use std::path::{Path, PathBuf};

const APP_DIR: &str = "tetris-arcade";
const USERS_FILE: &str = "users.json";
const HISTORY_FILE: &str = "history.jsonl";
const LOG_FILE: &str = "tetris.log";

/// Root directory holding every persisted file of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$XDG_DATA_HOME/tetris-arcade`, falling back to `~/.local/share/tetris-arcade`
    /// and finally to `./tetris-arcade`.
    pub fn platform_default() -> Self {
        let base = match std::env::var("XDG_DATA_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
            _ => std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".local").join("share"))
                .unwrap_or_else(|_| PathBuf::from(".")),
        };
        Self::new(base.join(APP_DIR))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn users_path(&self) -> PathBuf {
        self.root.join(USERS_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.root.join(HISTORY_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    /// Create the directory if needed.
    pub fn ensure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }
}
