//! Pointer input as delivered by the host
//!
//! Mouse and touch events share one representation. Touch events carry the
//! list of changed touch points; only the first one is ever read, so there is
//! no multi-touch support.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Which part of a press-move-release gesture an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    /// `mousedown` / `touchstart`
    Down,
    /// `mousemove` / `touchmove`
    Move,
    /// `mouseup` / `touchend`
    Up,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PointerInput {
    Mouse { x: f64, y: f64 },
    Touch { changed_touches: Vec<Point> },
}

impl PointerInput {
    pub fn mouse(x: f64, y: f64) -> Self {
        PointerInput::Mouse { x, y }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        PointerInput::Touch {
            changed_touches: vec![Point::new(x, y)],
        }
    }

    /// Client coordinates of the event, or `None` for a touch event with no
    /// changed touches.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerInput::Mouse { x, y } => Some(Point::new(*x, *y)),
            PointerInput::Touch { changed_touches } => changed_touches.first().copied(),
        }
    }

    pub fn is_touch(&self) -> bool {
        matches!(self, PointerInput::Touch { .. })
    }
}
