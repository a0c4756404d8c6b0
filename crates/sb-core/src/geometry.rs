//! Pure canvas geometry: clamping, spawn placement, hit testing, delete
//! zone tests, and the square-aspect resize math.
//!
//! No state lives here. Malformed input (non-finite numbers) resolves to
//! a safe fallback value, never an error.

use crate::constants::*;
use crate::model::{Point, Rect, Viewport};
use rand::Rng;

/// Fallback position used whenever geometry input is malformed: just
/// below the toolbar, inset by the canvas padding.
pub fn fallback_position() -> Point {
    Point::new(CANVAS_PADDING, TOOLBAR_HEIGHT + CANVAS_PADDING)
}

/// Clamp a note's top-left corner so its full square stays inside the
/// padded canvas.
pub fn clamp_position(position: Point, note_size: f32, viewport: Viewport) -> Point {
    if !position.is_finite() || !note_size.is_finite() || !viewport.is_finite() {
        return fallback_position();
    }
    // Lower bound wins when the canvas is too small to fit the note.
    Point::new(
        position
            .x
            .min(viewport.width - note_size - CANVAS_PADDING)
            .max(CANVAS_PADDING),
        position
            .y
            .min(viewport.height - note_size - CANVAS_PADDING)
            .max(CANVAS_PADDING),
    )
}

/// Inclusive point-in-rectangle test. Non-finite input is never a hit.
pub fn point_in_rect(point: Point, rect: Rect) -> bool {
    if !point.is_finite() || !rect.is_finite() {
        return false;
    }
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

/// Pick a uniformly random spawn position in the strip between the
/// toolbar and the trash-zone buffer, inset by the canvas padding.
pub fn random_position(viewport: Viewport, note_size: f32) -> Point {
    if !viewport.is_finite() || !note_size.is_finite() {
        return fallback_position();
    }
    let available_w = (viewport.width - note_size - CANVAS_PADDING * 2.0).max(0.0);
    let available_h =
        (viewport.height - note_size - TOOLBAR_HEIGHT - TRASH_ZONE_BUFFER - CANVAS_PADDING * 2.0)
            .max(0.0);
    let mut rng = rand::rng();
    Point::new(
        CANVAS_PADDING + rng.random_range(0.0..=available_w),
        TOOLBAR_HEIGHT + CANVAS_PADDING + rng.random_range(0.0..=available_h),
    )
}

/// Y coordinate above which a drop repositions and below which it deletes.
pub fn delete_threshold(viewport_height: f32) -> f32 {
    viewport_height - DELETE_ZONE_HEIGHT
}

/// True when the position falls inside the bottom delete strip. Used both
/// for the real delete-on-drop decision and the live "will delete"
/// preview during a drag.
pub fn in_delete_zone(position: Point, viewport_height: f32) -> bool {
    if !position.y.is_finite() || !viewport_height.is_finite() {
        return false;
    }
    position.y > delete_threshold(viewport_height)
}

// ─── Sizing ──────────────────────────────────────────────────────────────

/// Clamp a side length into `[MIN_NOTE_SIZE, MAX_NOTE_SIZE]`.
pub fn clamp_size(size: f32) -> f32 {
    if !size.is_finite() {
        return MIN_NOTE_SIZE;
    }
    size.min(MAX_NOTE_SIZE).max(MIN_NOTE_SIZE)
}

/// Size after a corner drag. The delta is the larger of the two axis
/// deltas, which keeps the note square while letting diagonal, vertical,
/// and horizontal drags all feel consistent.
pub fn resized_size(start_size: f32, current: Point, start: Point) -> f32 {
    if !start_size.is_finite() {
        return MIN_NOTE_SIZE;
    }
    if !current.is_finite() || !start.is_finite() {
        return clamp_size(start_size);
    }
    let delta = (current.x - start.x).max(current.y - start.y);
    clamp_size(start_size + delta)
}

/// Top-left corner of the visual resize handle, centered on the note's
/// bottom-right corner.
pub fn resize_handle_origin(note_position: Point, note_size: f32) -> Option<Point> {
    if !note_position.is_finite() || !note_size.is_finite() {
        return None;
    }
    let half = RESIZE_HANDLE_SIZE / 2.0;
    Some(Point::new(
        note_position.x + note_size - half,
        note_position.y + note_size - half,
    ))
}

/// Hit test against an expanded box around the resize handle. The box is
/// larger than the visual handle to ease targeting.
pub fn in_resize_handle(point: Point, note_position: Point, note_size: f32) -> bool {
    if !point.is_finite() {
        return false;
    }
    let Some(origin) = resize_handle_origin(note_position, note_size) else {
        return false;
    };
    let expanded = RESIZE_HANDLE_SIZE + 4.0;
    point.x >= origin.x - 2.0
        && point.x <= origin.x + expanded + 2.0
        && point.y >= origin.y - 2.0
        && point.y <= origin.y + expanded + 2.0
}
