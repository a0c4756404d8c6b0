//! Canvas and note tuning constants.

pub const DEFAULT_NOTE_SIZE: f32 = 200.0;
pub const MIN_NOTE_SIZE: f32 = 100.0;
pub const MAX_NOTE_SIZE: f32 = 400.0;

pub const CANVAS_PADDING: f32 = 20.0;
pub const TOOLBAR_HEIGHT: f32 = 80.0;
/// Height of the bottom strip that deletes a note dropped inside it.
pub const DELETE_ZONE_HEIGHT: f32 = 100.0;
/// Extra clearance above the delete zone when spawning notes.
pub const TRASH_ZONE_BUFFER: f32 = 120.0;
pub const RESIZE_HANDLE_SIZE: f32 = 8.0;
/// Pointer travel (px) below which a press stays a click.
pub const DRAG_THRESHOLD: f32 = 3.0;

/// Stacking order allocation.
pub const Z_BASE: i32 = 1;
pub const Z_INCREMENT: i32 = 1;
/// Reserved z-index for the note under an active move gesture. Always
/// above any normal allocation.
pub const Z_DRAGGING: i32 = 9999;

/// Swatch palette; the first entry is the default for new notes.
pub const NOTE_COLORS: [&str; 8] = [
    "#FFF59D", // light yellow
    "#FFAB91", // light orange
    "#A5D6A7", // light green
    "#90CAF9", // light blue
    "#F48FB1", // light pink
    "#CE93D8", // light purple
    "#FFCC02", // yellow
    "#FF8A65", // orange
];

pub const DEFAULT_NOTE_COLOR: &str = NOTE_COLORS[0];

pub const STORAGE_KEY: &str = "sticky-notes-data";
pub const STORAGE_VERSION: &str = "1.0.0";
