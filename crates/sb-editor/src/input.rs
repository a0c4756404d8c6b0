//! Pointer input normalization.
//!
//! Mouse and touch events funnel through one position extractor so the
//! gesture controller never branches on the input device. Touch events
//! carry both the active and the changed touch lists; end events usually
//! populate only the changed list.

use sb_core::model::Point;

/// A raw pointer event from the global input surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse {
        position: Point,
    },
    Touch {
        /// Touches currently on the surface.
        touches: Vec<Point>,
        /// Touches that changed in this event (the only source on
        /// touch-end, when the finger has already lifted).
        changed_touches: Vec<Point>,
    },
}

impl PointerInput {
    pub fn mouse(x: f32, y: f32) -> Self {
        Self::Mouse {
            position: Point::new(x, y),
        }
    }

    pub fn touch(touches: Vec<Point>, changed_touches: Vec<Point>) -> Self {
        Self::Touch {
            touches,
            changed_touches,
        }
    }

    /// Normalized event position: for touch, prefer the first changed
    /// touch, otherwise the first active touch. `None` when a touch event
    /// carries no usable point.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Mouse { position } => Some(*position),
            Self::Touch {
                touches,
                changed_touches,
            } => changed_touches.first().or_else(|| touches.first()).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mouse_position_is_direct() {
        assert_eq!(
            PointerInput::mouse(12.0, 34.0).position(),
            Some(Point::new(12.0, 34.0))
        );
    }

    #[test]
    fn touch_prefers_first_changed_touch() {
        let event = PointerInput::touch(
            vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
            vec![Point::new(9.0, 9.0)],
        );
        assert_eq!(event.position(), Some(Point::new(9.0, 9.0)));
    }

    #[test]
    fn touch_falls_back_to_first_active_touch() {
        let event = PointerInput::touch(vec![Point::new(5.0, 6.0)], Vec::new());
        assert_eq!(event.position(), Some(Point::new(5.0, 6.0)));
    }

    #[test]
    fn empty_touch_event_has_no_position() {
        assert_eq!(PointerInput::touch(Vec::new(), Vec::new()).position(), None);
    }
}
