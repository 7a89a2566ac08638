//! Credential store - player name to salted password hash.
//!
//! Passwords are never persisted: a record keeps a random 8-byte salt (hex)
//! and `sha256(salt ‖ password)` (hex).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::StoreError;

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub salt: String,
    pub hash: String,
    pub created: DateTime<Utc>,
}

impl PlayerRecord {
    /// Register `name` with a fresh random salt.
    pub fn new(name: &str, password: &str) -> Self {
        let salt = hex::encode(rand::random::<[u8; 8]>());
        Self::with_salt(name, password, &salt, Utc::now())
    }

    pub fn with_salt(name: &str, password: &str, salt: &str, created: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            salt: salt.to_string(),
            hash: hash_password(salt, password),
            created,
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.hash
    }
}

/// Hex-encoded SHA-256 of `salt` followed by `password`.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Keyed lookup of player credentials.
pub trait CredentialStore {
    fn find(&self, name: &str) -> Result<Option<PlayerRecord>, StoreError>;

    /// Add a new record. Fails with [`StoreError::Duplicate`] if the name exists.
    fn insert(&mut self, record: PlayerRecord) -> Result<(), StoreError>;
}

/// Credentials kept as a JSON array in a single file.
///
/// The file is re-read on every lookup and rewritten through a temp file plus
/// rename on insert, so a crash mid-write never leaves a truncated file.
#[derive(Debug, Clone)]
pub struct JsonCredentialStore {
    path: PathBuf,
}

impl JsonCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|err| StoreError::json(&self.path, err))
    }

    fn save(&self, records: &[PlayerRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
        }
        let json = serde_json::to_vec_pretty(records)
            .map_err(|err| StoreError::json(&self.path, err))?;

        let tmp = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp).map_err(|err| StoreError::io(&tmp, err))?;
        file.write_all(&json)
            .and_then(|_| file.sync_all())
            .map_err(|err| StoreError::io(&tmp, err))?;
        fs::rename(&tmp, &self.path).map_err(|err| StoreError::io(&self.path, err))
    }
}

impl CredentialStore for JsonCredentialStore {
    fn find(&self, name: &str) -> Result<Option<PlayerRecord>, StoreError> {
        Ok(self.load()?.into_iter().find(|r| r.name == name))
    }

    fn insert(&mut self, record: PlayerRecord) -> Result<(), StoreError> {
        let mut records = self.load()?;
        if records.iter().any(|r| r.name == record.name) {
            return Err(StoreError::Duplicate(record.name));
        }
        debug!(player = %record.name, path = %self.path.display(), "writing credential record");
        records.push(record);
        self.save(&records)
    }
}

/// In-memory credentials, counting writes so tests can check idempotence.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    records: Vec<PlayerRecord>,
    writes: usize,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of successful inserts so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn find(&self, name: &str) -> Result<Option<PlayerRecord>, StoreError> {
        Ok(self.records.iter().find(|r| r.name == name).cloned())
    }

    fn insert(&mut self, record: PlayerRecord) -> Result<(), StoreError> {
        if self.records.iter().any(|r| r.name == record.name) {
            return Err(StoreError::Duplicate(record.name));
        }
        self.records.push(record);
        self.writes += 1;
        Ok(())
    }
}
