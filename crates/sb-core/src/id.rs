use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Opaque unique token for a note, immutable for the note's lifetime.
/// Ids restored from storage round-trip verbatim, so the inner
/// representation stays the raw string rather than a parsed UUID.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NoteId(String);

impl NoteId {
    /// Allocate a fresh id for a newly created note.
    pub fn generate() -> Self {
        NoteId(format!("note-{}", Uuid::new_v4()))
    }

    /// Wrap an existing token (restored state, tests).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        NoteId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId({})", self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for NoteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NoteId(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = NoteId::generate();
        let b = NoteId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("note-"));
    }

    #[test]
    fn serializes_as_bare_string() {
        let id = NoteId::from_raw("note-legacy-abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"note-legacy-abc123\"");
        let back: NoteId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
