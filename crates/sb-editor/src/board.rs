//! Board controller: the seam between gestures, the note store, and
//! durable storage.
//!
//! The presentation layer feeds raw pointer events and toolbar actions in
//! here; the controller classifies gestures, applies the resulting store
//! commands, and persists after every committed change. Storage failures
//! are recoverable: they set `last_error` and leave the in-memory board
//! untouched.

use sb_core::constants::{DEFAULT_NOTE_SIZE, TOOLBAR_HEIGHT};
use sb_core::geometry::{clamp_position, in_delete_zone, random_position};
use sb_core::model::{BoardState, DragKind, NoteUpdate, Point, Viewport};
use sb_core::persist::{self, StorageBackend, StorageInfo};
use sb_core::{NoteId, NoteStore};

use crate::gesture::{GestureController, GestureEvent};
use crate::input::PointerInput;

pub struct BoardController<S: StorageBackend> {
    store: NoteStore,
    gestures: GestureController,
    backend: S,
    viewport: Viewport,
    /// Most recent storage failure, if any. Cleared by the next
    /// successful write.
    last_error: Option<String>,
}

impl<S: StorageBackend> BoardController<S> {
    /// Create the controller and seed the store from storage, repairing
    /// the counter and stacking invariants in the process.
    pub fn new(backend: S, viewport: Viewport) -> Self {
        let mut controller = Self {
            store: NoteStore::new(),
            gestures: GestureController::new(),
            backend,
            viewport,
            last_error: None,
        };
        let loaded = persist::load_notes(&controller.backend);
        if !loaded.notes.is_empty() {
            controller
                .store
                .load_notes(loaded.notes, loaded.note_counter);
        }
        controller
    }

    pub fn state(&self) -> &BoardState {
        self.store.state()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether a classified drag or resize is in flight (for cursor and
    /// delete-zone affordances).
    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    pub fn storage_info(&self) -> StorageInfo {
        persist::storage_info(&self.backend)
    }

    /// Hand the backend back, e.g. when tearing the board down.
    pub fn into_backend(self) -> S {
        self.backend
    }

    // ─── Command surface ─────────────────────────────────────────────────

    pub fn create_note(&mut self, position: Point, size: Option<f32>, color: Option<String>) {
        self.store.create_note(position, size, color);
        self.persist();
    }

    /// Create a note at a random free spot between the toolbar and the
    /// trash strip.
    pub fn spawn_note(&mut self, color: Option<String>) {
        let position = random_position(self.viewport, DEFAULT_NOTE_SIZE);
        self.create_note(position, None, color);
    }

    pub fn update_note(&mut self, id: &NoteId, update: NoteUpdate) {
        self.store.update_note(id, update);
        self.persist();
    }

    pub fn delete_note(&mut self, id: &NoteId) {
        self.store.delete_note(id);
        self.persist();
    }

    /// Selection is presentation state; it is not persisted.
    pub fn select_note(&mut self, id: Option<NoteId>) {
        self.store.select_note(id);
    }

    pub fn bring_to_front(&mut self, id: &NoteId) {
        self.store.bring_to_front(id);
        self.persist();
    }

    /// Drop the stored record and reset the board, counters included.
    pub fn clear_all(&mut self) {
        if let Err(err) = persist::clear_storage(&mut self.backend) {
            log::warn!("failed to clear storage: {err}");
            self.last_error = Some(err.to_string());
        }
        self.store.clear_all();
        self.persist();
    }

    // ─── Pointer surface ─────────────────────────────────────────────────

    /// Press on a note's header: may become a move drag once the pointer
    /// travels past the threshold.
    pub fn press_note(&mut self, id: &NoteId, event: &PointerInput) {
        let Some(note) = self.store.state().note(id) else {
            return;
        };
        self.gestures.begin_drag(id.clone(), event, note.top_left());
    }

    /// Press on a note's resize corner: a resize session starts at once.
    pub fn press_resize_handle(&mut self, id: &NoteId, event: &PointerInput) {
        let Some(note) = self.store.state().note(id) else {
            return;
        };
        let start_size = note.size;
        let events = self.gestures.begin_resize(id.clone(), event, start_size);
        self.dispatch(events);
    }

    pub fn pointer_moved(&mut self, event: &PointerInput) {
        let events = self.gestures.on_move(event);
        self.dispatch(events);
    }

    pub fn pointer_released(&mut self, event: &PointerInput) {
        let events = self.gestures.on_end(event);
        self.dispatch(events);
    }

    // ─── Gesture plumbing ────────────────────────────────────────────────

    fn dispatch(&mut self, events: Vec<GestureEvent>) {
        for event in events {
            match event {
                GestureEvent::DragStart {
                    note_id,
                    start_position,
                    offset,
                } => {
                    self.store
                        .start_drag(&note_id, DragKind::Move, start_position, offset);
                }
                GestureEvent::DragMove { position } => {
                    // Intermediate positions are uncommitted; persistence
                    // waits for the gesture to finish.
                    self.store.update_drag(position);
                }
                GestureEvent::DragEnd { .. } => {
                    self.store.end_drag();
                    self.persist();
                }
                GestureEvent::Drop { note_id, position } => self.handle_drop(&note_id, position),
                GestureEvent::ResizeStart { .. } => {
                    // Resize sessions live in the gesture controller; the
                    // store only sees the resulting size updates.
                }
                GestureEvent::ResizeMove { note_id, size } => {
                    self.store.update_note(&note_id, NoteUpdate::with_size(size));
                }
                GestureEvent::ResizeEnd { note_id, size } => {
                    self.update_note(&note_id, NoteUpdate::with_size(size));
                }
            }
        }
    }

    /// A drop inside the delete zone removes the note; anywhere else it
    /// is clamped back into the canvas below the toolbar. No other path
    /// re-clamps positions.
    fn handle_drop(&mut self, note_id: &NoteId, position: Point) {
        if in_delete_zone(position, self.viewport.height) {
            self.delete_note(note_id);
            return;
        }
        let Some(note) = self.store.state().note(note_id) else {
            return;
        };
        let canvas = Viewport::new(self.viewport.width, self.viewport.height - TOOLBAR_HEIGHT);
        let clamped = clamp_position(note.top_left(), note.size, canvas);
        if clamped != note.top_left() {
            self.update_note(note_id, NoteUpdate::position(clamped));
        }
    }

    fn persist(&mut self) {
        let state = self.store.state();
        match persist::save_notes(&mut self.backend, &state.notes, state.note_counter) {
            Ok(()) => self.last_error = None,
            Err(err) => {
                log::warn!("failed to save notes: {err}");
                self.last_error = Some(err.to_string());
            }
        }
    }
}
