//! Core data model for the sticky-note board.
//!
//! Notes live on a free-form 2D canvas. The `BoardState` snapshot is owned
//! by the `NoteStore` and is the single source of truth; paint order comes
//! from each note's `z_index`, not from collection order (collection order
//! is creation/load order).

use crate::constants::Z_BASE;
use crate::id::NoteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Geometry primitives ─────────────────────────────────────────────────

/// A canvas-space position. Also used as a vector for gesture offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f32 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// Axis-aligned rectangle for hit tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

// ─── Notes ───────────────────────────────────────────────────────────────

/// One sticky note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Display label, assigned once from the note counter. Never renumbered.
    pub title: String,
    /// Top-left corner, canvas coordinates.
    pub x: f32,
    pub y: f32,
    /// Square side length, kept within `[MIN_NOTE_SIZE, MAX_NOTE_SIZE]`.
    pub size: f32,
    pub content: String,
    /// Swatch token from the palette.
    pub color: String,
    /// Paint priority among overlapping notes; higher paints on top.
    pub z_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.size,
            height: self.size,
        }
    }

    /// Restored records are only partially trusted; loading rejects notes
    /// whose spatial fields are non-finite.
    pub fn numeric_fields_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.size.is_finite()
    }
}

/// Partial update for the mutable fields of a note. Identity fields
/// (`id`, `title`, `created_at`) have no representation here and cannot
/// be altered through the update path.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub size: Option<f32>,
    pub content: Option<String>,
    pub color: Option<String>,
}

impl NoteUpdate {
    pub fn position(position: Point) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            ..Self::default()
        }
    }

    pub fn with_size(size: f32) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

// ─── Gesture session ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    Resize,
}

/// Transient record of an in-progress gesture. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub kind: DragKind,
    pub active_note_id: NoteId,
    /// Pointer position at gesture start, canvas space.
    pub start_position: Point,
    /// Vector from the note's top-left corner to the pointer at gesture
    /// start. Meaningful only for move sessions.
    pub offset: Point,
}

// ─── Board snapshot ──────────────────────────────────────────────────────

/// The whole-application snapshot, owned exclusively by the `NoteStore`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub notes: Vec<Note>,
    pub drag: Option<DragSession>,
    /// At most one note selected at a time.
    pub selected_note_id: Option<NoteId>,
    /// Monotonic stacking-slot allocator.
    pub next_z_index: i32,
    /// Monotonic display-number allocator.
    pub note_counter: u32,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            drag: None,
            selected_note_id: None,
            next_z_index: Z_BASE,
            note_counter: 1,
        }
    }
}

impl BoardState {
    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub(crate) fn note_mut(&mut self, id: &NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| &n.id == id)
    }
}
