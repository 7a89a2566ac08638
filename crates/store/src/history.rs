//! History store - append-only log of finished games.

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StoreError;

/// One finished game. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    #[serde(default)]
    pub lines: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub duration_ms: u64,
    pub played_at: DateTime<Utc>,
}

fn default_level() -> u32 {
    1
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u32, played_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            score,
            lines: 0,
            level: default_level(),
            duration_ms: 0,
            played_at,
        }
    }

    pub fn with_stats(mut self, lines: u32, level: u32, duration_ms: u64) -> Self {
        self.lines = lines;
        self.level = level;
        self.duration_ms = duration_ms;
        self
    }
}

/// Append-only collection of [`ScoreEntry`] in insertion order.
pub trait HistoryStore {
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), StoreError>;

    fn entries(&self) -> Result<Vec<ScoreEntry>, StoreError>;
}

/// History kept as JSON lines, one entry per line.
#[derive(Debug, Clone)]
pub struct JsonlHistoryStore {
    path: PathBuf,
}

impl JsonlHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonlHistoryStore {
    /// A file left ending in a partial line gets a newline before the record,
    /// so the new entry never merges with the broken one.
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| StoreError::io(&self.path, err))?;

        let mut record = Vec::new();
        if ends_mid_line(&mut file).map_err(|err| StoreError::io(&self.path, err))? {
            warn!(path = %self.path.display(), "history ends in a partial line");
            record.push(b'\n');
        }
        serde_json::to_writer(&mut record, entry)
            .map_err(|err| StoreError::json(&self.path, err))?;
        record.push(b'\n');

        file.write_all(&record)
            .map_err(|err| StoreError::io(&self.path, err))
    }

    /// Lines that are not a valid entry (bad JSON, bad UTF-8) are skipped
    /// with a warning. Only I/O errors fail the read.
    fn entries(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        let mut reader = BufReader::new(file);
        let mut entries = Vec::new();
        let mut line = Vec::new();
        let mut number = 0;
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|err| StoreError::io(&self.path, err))?;
            if read == 0 {
                break;
            }
            number += 1;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            match serde_json::from_slice::<ScoreEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(err) => warn!(
                    path = %self.path.display(),
                    line = number,
                    error = %err,
                    "skipping malformed history line"
                ),
            }
        }
        Ok(entries)
    }
}

/// Whether a non-empty file lacks its trailing newline.
fn ends_mid_line(file: &mut fs::File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// In-memory history. Can be switched offline to exercise write failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    entries: Vec<ScoreEntry>,
    offline: bool,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<ScoreEntry>) -> Self {
        Self {
            entries,
            offline: false,
        }
    }

    /// While offline, `append` fails with [`StoreError::Unavailable`].
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable("history store is offline".into()));
        }
        self.entries.push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(self.entries.clone())
    }
}
