pub mod constants;
pub mod geometry;
pub mod id;
pub mod model;
pub mod persist;
pub mod store;

pub use id::NoteId;
pub use model::*;
pub use persist::{LoadedNotes, MemoryBackend, StorageBackend, StorageError, StorageRecord};
pub use store::{Command, NoteStore};
