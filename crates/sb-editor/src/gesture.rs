//! Gesture recognition for note drags and resizes.
//!
//! The controller owns at most one active gesture, acquired when a press
//! begins and released on every end event. A press-and-move stays a click
//! until the pointer travels past `DRAG_THRESHOLD`; crossing it promotes
//! the press to a move drag. Resize gestures start immediately, with no
//! threshold, and run the square-aspect size math on every move.

use sb_core::NoteId;
use sb_core::constants::DRAG_THRESHOLD;
use sb_core::geometry::resized_size;
use sb_core::model::Point;

use crate::input::PointerInput;

/// Notifications emitted toward the board controller.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// Threshold crossed. Carries the original press position and the
    /// press-to-corner offset, not the position that crossed.
    DragStart {
        note_id: NoteId,
        start_position: Point,
        offset: Point,
    },
    DragMove {
        position: Point,
    },
    DragEnd {
        position: Point,
    },
    /// Fired after `DragEnd` with the final position, for drop handling
    /// (delete zone, clamping).
    Drop {
        note_id: NoteId,
        position: Point,
    },
    ResizeStart {
        note_id: NoteId,
        start_position: Point,
        start_size: f32,
    },
    ResizeMove {
        note_id: NoteId,
        size: f32,
    },
    ResizeEnd {
        note_id: NoteId,
        size: f32,
    },
}

enum ActiveGesture {
    Drag {
        note_id: NoteId,
        start_position: Point,
        offset: Point,
        /// Most recent pointer position, the fallback when an end event
        /// carries no usable point.
        last_position: Point,
        crossed_threshold: bool,
    },
    Resize {
        note_id: NoteId,
        start_position: Point,
        start_size: f32,
        last_position: Point,
    },
}

/// Session-scoped gesture recognizer. One gesture at a time; beginning a
/// new gesture while one is active is ignored.
#[derive(Default)]
pub struct GestureController {
    active: Option<ActiveGesture>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture session holds the pointer.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the session has been classified as a drag or resize (as
    /// opposed to a press that may still turn out to be a click).
    pub fn is_dragging(&self) -> bool {
        match &self.active {
            Some(ActiveGesture::Drag {
                crossed_threshold, ..
            }) => *crossed_threshold,
            Some(ActiveGesture::Resize { .. }) => true,
            None => false,
        }
    }

    pub fn active_note(&self) -> Option<&NoteId> {
        match &self.active {
            Some(ActiveGesture::Drag { note_id, .. })
            | Some(ActiveGesture::Resize { note_id, .. }) => Some(note_id),
            None => None,
        }
    }

    /// Begin a press on a note's header. Captures the press position and
    /// the offset to the note's top-left corner, but does not yet declare
    /// a drag.
    pub fn begin_drag(&mut self, note_id: NoteId, event: &PointerInput, note_top_left: Point) {
        if self.active.is_some() {
            return;
        }
        let Some(position) = event.position() else {
            return;
        };
        let offset = Point::new(position.x - note_top_left.x, position.y - note_top_left.y);
        self.active = Some(ActiveGesture::Drag {
            note_id,
            start_position: position,
            offset,
            last_position: position,
            crossed_threshold: false,
        });
    }

    /// Begin a resize from the note's corner handle. Emits `ResizeStart`
    /// immediately; resizes have no click ambiguity to disambiguate.
    pub fn begin_resize(
        &mut self,
        note_id: NoteId,
        event: &PointerInput,
        start_size: f32,
    ) -> Vec<GestureEvent> {
        if self.active.is_some() {
            return Vec::new();
        }
        let Some(position) = event.position() else {
            return Vec::new();
        };
        self.active = Some(ActiveGesture::Resize {
            note_id: note_id.clone(),
            start_position: position,
            start_size,
            last_position: position,
        });
        vec![GestureEvent::ResizeStart {
            note_id,
            start_position: position,
            start_size,
        }]
    }

    pub fn on_move(&mut self, event: &PointerInput) -> Vec<GestureEvent> {
        let Some(position) = event.position() else {
            return Vec::new();
        };
        match &mut self.active {
            Some(ActiveGesture::Drag {
                note_id,
                start_position,
                offset,
                last_position,
                crossed_threshold,
            }) => {
                *last_position = position;
                let mut events = Vec::new();
                if !*crossed_threshold {
                    if start_position.distance_to(position) <= DRAG_THRESHOLD {
                        return events;
                    }
                    *crossed_threshold = true;
                    events.push(GestureEvent::DragStart {
                        note_id: note_id.clone(),
                        start_position: *start_position,
                        offset: *offset,
                    });
                }
                events.push(GestureEvent::DragMove { position });
                events
            }
            Some(ActiveGesture::Resize {
                note_id,
                start_position,
                start_size,
                last_position,
            }) => {
                *last_position = position;
                vec![GestureEvent::ResizeMove {
                    note_id: note_id.clone(),
                    size: resized_size(*start_size, position, *start_position),
                }]
            }
            None => Vec::new(),
        }
    }

    /// End the gesture. The session is released on every path; a press
    /// that never crossed the threshold ends silently as a click. An end
    /// event without a usable position (empty touch lists) still
    /// completes the gesture, at the last tracked position, so a crossed
    /// drag always ends with `DragEnd`/`Drop`.
    pub fn on_end(&mut self, event: &PointerInput) -> Vec<GestureEvent> {
        let Some(gesture) = self.active.take() else {
            return Vec::new();
        };
        match gesture {
            ActiveGesture::Drag {
                note_id,
                last_position,
                crossed_threshold,
                ..
            } => {
                if crossed_threshold {
                    let position = event.position().unwrap_or(last_position);
                    vec![
                        GestureEvent::DragEnd { position },
                        GestureEvent::Drop { note_id, position },
                    ]
                } else {
                    Vec::new()
                }
            }
            ActiveGesture::Resize {
                note_id,
                start_position,
                start_size,
                last_position,
            } => {
                let position = event.position().unwrap_or(last_position);
                vec![GestureEvent::ResizeEnd {
                    note_id,
                    size: resized_size(start_size, position, start_position),
                }]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(raw: &str) -> NoteId {
        NoteId::from_raw(raw)
    }

    #[test]
    fn press_alone_is_not_a_drag() {
        let mut gestures = GestureController::new();
        gestures.begin_drag(id("a"), &PointerInput::mouse(100.0, 100.0), Point::new(90.0, 80.0));
        assert!(gestures.is_active());
        assert!(!gestures.is_dragging());
    }

    #[test]
    fn travel_below_threshold_stays_a_click() {
        let mut gestures = GestureController::new();
        gestures.begin_drag(id("a"), &PointerInput::mouse(100.0, 100.0), Point::new(90.0, 80.0));

        assert_eq!(gestures.on_move(&PointerInput::mouse(101.0, 101.0)), vec![]);
        assert_eq!(gestures.on_move(&PointerInput::mouse(102.0, 100.0)), vec![]);
        assert_eq!(gestures.on_end(&PointerInput::mouse(102.0, 100.0)), vec![]);
        assert!(!gestures.is_active());
    }

    #[test]
    fn crossing_threshold_fires_start_with_original_position() {
        let mut gestures = GestureController::new();
        gestures.begin_drag(id("a"), &PointerInput::mouse(100.0, 100.0), Point::new(90.0, 80.0));

        let events = gestures.on_move(&PointerInput::mouse(110.0, 100.0));
        assert_eq!(
            events,
            vec![
                GestureEvent::DragStart {
                    note_id: id("a"),
                    start_position: Point::new(100.0, 100.0),
                    offset: Point::new(10.0, 20.0),
                },
                GestureEvent::DragMove {
                    position: Point::new(110.0, 100.0)
                },
            ]
        );
        assert!(gestures.is_dragging());

        // Subsequent moves only fire moves.
        let events = gestures.on_move(&PointerInput::mouse(120.0, 130.0));
        assert_eq!(
            events,
            vec![GestureEvent::DragMove {
                position: Point::new(120.0, 130.0)
            }]
        );
    }

    #[test]
    fn end_after_drag_fires_end_then_drop() {
        let mut gestures = GestureController::new();
        gestures.begin_drag(id("a"), &PointerInput::mouse(0.0, 0.0), Point::default());
        gestures.on_move(&PointerInput::mouse(50.0, 50.0));

        let events = gestures.on_end(&PointerInput::mouse(60.0, 70.0));
        assert_eq!(
            events,
            vec![
                GestureEvent::DragEnd {
                    position: Point::new(60.0, 70.0)
                },
                GestureEvent::Drop {
                    note_id: id("a"),
                    position: Point::new(60.0, 70.0)
                },
            ]
        );
        assert!(!gestures.is_active());
    }

    #[test]
    fn controller_is_reusable_after_release() {
        let mut gestures = GestureController::new();
        gestures.begin_drag(id("a"), &PointerInput::mouse(0.0, 0.0), Point::default());
        gestures.on_end(&PointerInput::mouse(0.0, 0.0));

        gestures.begin_drag(id("b"), &PointerInput::mouse(10.0, 10.0), Point::default());
        assert_eq!(gestures.active_note(), Some(&id("b")));
    }

    #[test]
    fn reentrant_begin_is_ignored() {
        let mut gestures = GestureController::new();
        gestures.begin_drag(id("a"), &PointerInput::mouse(0.0, 0.0), Point::default());
        gestures.begin_drag(id("b"), &PointerInput::mouse(5.0, 5.0), Point::default());
        assert_eq!(gestures.active_note(), Some(&id("a")));

        let events = gestures.begin_resize(id("c"), &PointerInput::mouse(5.0, 5.0), 200.0);
        assert_eq!(events, vec![]);
        assert_eq!(gestures.active_note(), Some(&id("a")));
    }

    #[test]
    fn resize_starts_immediately_and_clamps() {
        let mut gestures = GestureController::new();
        let events = gestures.begin_resize(id("a"), &PointerInput::mouse(200.0, 200.0), 200.0);
        assert_eq!(
            events,
            vec![GestureEvent::ResizeStart {
                note_id: id("a"),
                start_position: Point::new(200.0, 200.0),
                start_size: 200.0,
            }]
        );
        assert!(gestures.is_dragging());

        let events = gestures.on_move(&PointerInput::mouse(250.0, 230.0));
        assert_eq!(
            events,
            vec![GestureEvent::ResizeMove {
                note_id: id("a"),
                size: 250.0
            }]
        );

        // Way past the maximum: clamped.
        let events = gestures.on_move(&PointerInput::mouse(900.0, 200.0));
        assert_eq!(
            events,
            vec![GestureEvent::ResizeMove {
                note_id: id("a"),
                size: 400.0
            }]
        );

        let events = gestures.on_end(&PointerInput::mouse(260.0, 240.0));
        assert_eq!(
            events,
            vec![GestureEvent::ResizeEnd {
                note_id: id("a"),
                size: 260.0
            }]
        );
        assert!(!gestures.is_active());
    }

    #[test]
    fn touch_end_uses_changed_touches() {
        let mut gestures = GestureController::new();
        let press = PointerInput::touch(vec![Point::new(100.0, 100.0)], Vec::new());
        gestures.begin_drag(id("a"), &press, Point::new(100.0, 100.0));

        let move_event = PointerInput::touch(vec![Point::new(140.0, 100.0)], Vec::new());
        assert!(!gestures.on_move(&move_event).is_empty());

        // Finger lifted: only changed_touches is populated.
        let end_event = PointerInput::touch(Vec::new(), vec![Point::new(150.0, 110.0)]);
        let events = gestures.on_end(&end_event);
        assert_eq!(
            events.last(),
            Some(&GestureEvent::Drop {
                note_id: id("a"),
                position: Point::new(150.0, 110.0)
            })
        );
    }

    #[test]
    fn moves_without_a_session_emit_nothing() {
        let mut gestures = GestureController::new();
        assert_eq!(gestures.on_move(&PointerInput::mouse(10.0, 10.0)), vec![]);
        assert_eq!(gestures.on_end(&PointerInput::mouse(10.0, 10.0)), vec![]);
    }

    #[test]
    fn end_without_position_ends_the_drag_at_the_last_tracked_point() {
        let mut gestures = GestureController::new();
        gestures.begin_drag(id("a"), &PointerInput::mouse(0.0, 0.0), Point::default());
        gestures.on_move(&PointerInput::mouse(50.0, 50.0));

        let events = gestures.on_end(&PointerInput::touch(Vec::new(), Vec::new()));
        assert_eq!(
            events,
            vec![
                GestureEvent::DragEnd {
                    position: Point::new(50.0, 50.0)
                },
                GestureEvent::Drop {
                    note_id: id("a"),
                    position: Point::new(50.0, 50.0)
                },
            ]
        );
        assert!(!gestures.is_active());
    }

    #[test]
    fn end_without_position_before_threshold_is_still_a_click() {
        let mut gestures = GestureController::new();
        gestures.begin_drag(id("a"), &PointerInput::mouse(0.0, 0.0), Point::default());
        let events = gestures.on_end(&PointerInput::touch(Vec::new(), Vec::new()));
        assert_eq!(events, vec![]);
        assert!(!gestures.is_active());
    }

    #[test]
    fn resize_end_without_position_uses_the_last_tracked_point() {
        let mut gestures = GestureController::new();
        gestures.begin_resize(id("a"), &PointerInput::mouse(200.0, 200.0), 200.0);
        gestures.on_move(&PointerInput::mouse(250.0, 230.0));

        let events = gestures.on_end(&PointerInput::touch(Vec::new(), Vec::new()));
        assert_eq!(
            events,
            vec![GestureEvent::ResizeEnd {
                note_id: id("a"),
                size: 250.0
            }]
        );
        assert!(!gestures.is_active());
    }
}
