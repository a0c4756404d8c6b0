//! The note store state machine.
//!
//! Every board mutation flows through a `Command` applied atomically
//! against the authoritative `BoardState` snapshot. Commands never fail
//! for well-typed input: not-found ids degrade to a no-op and sizes are
//! clamped where an invariant requires it.

use crate::constants::*;
use crate::geometry::clamp_size;
use crate::id::NoteId;
use crate::model::*;
use chrono::Utc;

/// A state-transition command. Applied one at a time; there is no
/// interleaving inside the store.
#[derive(Debug, Clone)]
pub enum Command {
    Create {
        position: Point,
        size: Option<f32>,
        color: Option<String>,
    },
    Update {
        id: NoteId,
        update: NoteUpdate,
    },
    Delete {
        id: NoteId,
    },
    Select {
        id: Option<NoteId>,
    },
    BringToFront {
        id: NoteId,
    },
    StartDrag {
        note_id: NoteId,
        kind: DragKind,
        start_position: Point,
        offset: Point,
    },
    UpdateDrag {
        position: Point,
    },
    EndDrag,
    LoadNotes {
        notes: Vec<Note>,
        note_counter_hint: u32,
    },
    ClearAll,
}

/// Owns the board snapshot and applies commands sequentially.
#[derive(Debug, Default)]
pub struct NoteStore {
    state: BoardState,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The authoritative snapshot. Re-read after every command.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Apply one command atomically against the current snapshot.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Create {
                position,
                size,
                color,
            } => self.create(position, size, color),
            Command::Update { id, update } => self.update(&id, update),
            Command::Delete { id } => self.delete(&id),
            Command::Select { id } => self.state.selected_note_id = id,
            Command::BringToFront { id } => self.bring_to_front_inner(&id),
            Command::StartDrag {
                note_id,
                kind,
                start_position,
                offset,
            } => {
                // A drag always implies selection.
                self.state.selected_note_id = Some(note_id.clone());
                self.state.drag = Some(DragSession {
                    kind,
                    active_note_id: note_id,
                    start_position,
                    offset,
                });
            }
            Command::UpdateDrag { position } => self.update_drag_inner(position),
            Command::EndDrag => self.end_drag_inner(),
            Command::LoadNotes {
                notes,
                note_counter_hint,
            } => self.load(notes, note_counter_hint),
            Command::ClearAll => self.state = BoardState::default(),
        }
    }

    fn create(&mut self, position: Point, size: Option<f32>, color: Option<String>) {
        let now = Utc::now();
        let note = Note {
            id: NoteId::generate(),
            title: format!("Sticky Note {}", self.state.note_counter),
            x: position.x,
            y: position.y,
            size: clamp_size(size.unwrap_or(DEFAULT_NOTE_SIZE)),
            content: String::new(),
            color: color.unwrap_or_else(|| DEFAULT_NOTE_COLOR.to_string()),
            z_index: self.state.next_z_index,
            created_at: now,
            updated_at: now,
        };
        self.state.selected_note_id = Some(note.id.clone());
        self.state.notes.push(note);
        self.state.next_z_index += Z_INCREMENT;
        self.state.note_counter += 1;
    }

    fn update(&mut self, id: &NoteId, update: NoteUpdate) {
        if let Some(note) = self.state.note_mut(id) {
            if let Some(x) = update.x {
                note.x = x;
            }
            if let Some(y) = update.y {
                note.y = y;
            }
            if let Some(size) = update.size {
                note.size = clamp_size(size);
            }
            if let Some(content) = update.content {
                note.content = content;
            }
            if let Some(color) = update.color {
                note.color = color;
            }
            note.updated_at = Utc::now();
        }
    }

    fn delete(&mut self, id: &NoteId) {
        self.state.notes.retain(|n| &n.id != id);
        if self.state.selected_note_id.as_ref() == Some(id) {
            self.state.selected_note_id = None;
        }
    }

    fn bring_to_front_inner(&mut self, id: &NoteId) {
        let next = self.state.next_z_index;
        if let Some(note) = self.state.note_mut(id) {
            note.z_index = next;
            self.state.next_z_index += Z_INCREMENT;
        }
    }

    fn update_drag_inner(&mut self, position: Point) {
        let Some(session) = self.state.drag.clone() else {
            return;
        };
        if session.kind != DragKind::Move {
            return;
        }
        if let Some(note) = self.state.note_mut(&session.active_note_id) {
            // Subtracting the captured offset preserves the note-to-pointer
            // relationship across the whole gesture.
            note.x = position.x - session.offset.x;
            note.y = position.y - session.offset.y;
            note.z_index = Z_DRAGGING;
        }
    }

    fn end_drag_inner(&mut self) {
        if let Some(session) = self.state.drag.take() {
            let next = self.state.next_z_index;
            if let Some(note) = self.state.note_mut(&session.active_note_id)
                && note.z_index == Z_DRAGGING
            {
                // Promote off the sentinel to the top of the real stack.
                note.z_index = next;
            }
            // The allocator advances for any completed session, promoted
            // or not.
            self.state.next_z_index += Z_INCREMENT;
        }
    }

    /// Replace the collection with restored notes and repair the two
    /// invariants the stored record cannot be trusted to have preserved:
    /// the stacking allocator and the display-number counter.
    fn load(&mut self, notes: Vec<Note>, note_counter_hint: u32) {
        let max_z = notes.iter().map(|n| n.z_index).fold(Z_BASE, i32::max);
        let mut counter = note_counter_hint.max(1);
        for note in &notes {
            if let Some(n) = title_number(&note.title)
                && n >= counter
            {
                counter = n + 1;
            }
        }
        self.state.notes = notes;
        self.state.next_z_index = max_z + Z_INCREMENT;
        self.state.note_counter = counter;
    }

    // ─── Command surface ─────────────────────────────────────────────────

    pub fn create_note(&mut self, position: Point, size: Option<f32>, color: Option<String>) {
        self.apply(Command::Create {
            position,
            size,
            color,
        });
    }

    pub fn update_note(&mut self, id: &NoteId, update: NoteUpdate) {
        self.apply(Command::Update {
            id: id.clone(),
            update,
        });
    }

    pub fn delete_note(&mut self, id: &NoteId) {
        self.apply(Command::Delete { id: id.clone() });
    }

    pub fn select_note(&mut self, id: Option<NoteId>) {
        self.apply(Command::Select { id });
    }

    pub fn bring_to_front(&mut self, id: &NoteId) {
        self.apply(Command::BringToFront { id: id.clone() });
    }

    pub fn start_drag(&mut self, note_id: &NoteId, kind: DragKind, start_position: Point, offset: Point) {
        self.apply(Command::StartDrag {
            note_id: note_id.clone(),
            kind,
            start_position,
            offset,
        });
    }

    pub fn update_drag(&mut self, position: Point) {
        self.apply(Command::UpdateDrag { position });
    }

    pub fn end_drag(&mut self) {
        self.apply(Command::EndDrag);
    }

    pub fn load_notes(&mut self, notes: Vec<Note>, note_counter_hint: u32) {
        self.apply(Command::LoadNotes {
            notes,
            note_counter_hint,
        });
    }

    pub fn clear_all(&mut self) {
        self.apply(Command::ClearAll);
    }
}

/// Extract N from a generated "Sticky Note N" title, anywhere in the
/// string. Titles that don't match yield nothing.
fn title_number(title: &str) -> Option<u32> {
    const PATTERN: &str = "Sticky Note ";
    let idx = title.find(PATTERN)?;
    let rest = &title[idx + PATTERN.len()..];
    let digits = rest
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or("");
    digits.parse().ok()
}
