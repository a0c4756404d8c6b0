//! Durable storage for the note collection.
//!
//! The board persists through a pluggable key-value backend. Records are
//! JSON with ISO-8601 timestamps. Loading never fails: absent or
//! malformed records degrade to an empty collection and the failure is
//! logged, not raised.

use crate::constants::{STORAGE_KEY, STORAGE_VERSION};
use crate::model::Note;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to serialize notes: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Key-value durable store provided by the host: browser local storage,
/// a file, or an in-memory map in tests.
pub trait StorageBackend {
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// HashMap-backed storage for tests and in-process hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// The durable representation of the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageRecord {
    pub notes: Vec<Note>,
    pub note_counter: u32,
    pub last_modified: DateTime<Utc>,
    pub version: String,
}

/// Result of a load. Always usable, possibly empty.
#[derive(Debug)]
pub struct LoadedNotes {
    pub notes: Vec<Note>,
    pub note_counter: u32,
}

impl Default for LoadedNotes {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            note_counter: 1,
        }
    }
}

/// Storage summary for status displays.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageInfo {
    pub count: usize,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Serialize the collection and counters into the backend.
pub fn save_notes(
    backend: &mut dyn StorageBackend,
    notes: &[Note],
    note_counter: u32,
) -> Result<(), StorageError> {
    let record = StorageRecord {
        notes: notes.to_vec(),
        note_counter,
        last_modified: Utc::now(),
        version: STORAGE_VERSION.to_string(),
    };
    let serialized = serde_json::to_string(&record)?;
    backend.write(STORAGE_KEY, &serialized)
}

/// Restore the collection. Absent or unparseable records, and records
/// containing any non-finite numeric field, yield the empty collection.
/// Blank titles are backfilled from the note's position in the record.
pub fn load_notes(backend: &dyn StorageBackend) -> LoadedNotes {
    let stored = match backend.read(STORAGE_KEY) {
        Ok(Some(stored)) => stored,
        Ok(None) => return LoadedNotes::default(),
        Err(err) => {
            log::warn!("failed to read stored notes: {err}");
            return LoadedNotes::default();
        }
    };
    let record: StorageRecord = match serde_json::from_str(&stored) {
        Ok(record) => record,
        Err(err) => {
            log::warn!("discarding unparseable note record: {err}");
            return LoadedNotes::default();
        }
    };
    if record.notes.iter().any(|n| !n.numeric_fields_finite()) {
        log::warn!("discarding stored notes with non-finite fields");
        return LoadedNotes::default();
    }
    let notes = record
        .notes
        .into_iter()
        .enumerate()
        .map(|(i, mut note)| {
            if note.title.is_empty() {
                note.title = format!("Sticky Note {}", i + 1);
            }
            note
        })
        .collect();
    LoadedNotes {
        notes,
        note_counter: record.note_counter.max(1),
    }
}

/// Drop the stored record entirely.
pub fn clear_storage(backend: &mut dyn StorageBackend) -> Result<(), StorageError> {
    backend.remove(STORAGE_KEY)
}

/// Peek at the stored record without restoring it.
pub fn storage_info(backend: &dyn StorageBackend) -> StorageInfo {
    let empty = StorageInfo {
        count: 0,
        last_modified: None,
    };
    match backend.read(STORAGE_KEY) {
        Ok(Some(stored)) => match serde_json::from_str::<StorageRecord>(&stored) {
            Ok(record) => StorageInfo {
                count: record.notes.len(),
                last_modified: Some(record.last_modified),
            },
            Err(_) => empty,
        },
        _ => empty,
    }
}
