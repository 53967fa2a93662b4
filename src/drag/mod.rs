//! Drag and resize engine
//!
//! Attaching a window binds its header and the eight edge/corner handles (or,
//! for a headerless panel, the whole element). A pointer-down on a bound
//! target starts a [`DragSession`]; every pointer-move then turns the pointer
//! delta into a geometry change:
//!
//! - `Move` shifts the window with the pointer.
//! - `Resize(edge)` moves the grabbed edges while the opposite edges stay
//!   put. A dimension never drops below its minimum: once it would, the
//!   window is pinned at the minimum and the surplus pointer travel is banked
//!   in a per-axis overflow counter. The pointer has to travel back across
//!   that overflow before the window grows again, so it never jumps.
//! - `Suppressed` (a press on a header button) does nothing, letting the
//!   button's own release handler run without the window moving.

mod hit;

pub use hit::hit_test;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};
use crate::window::{ButtonKind, Window, WindowId, MIN_HEIGHT_ATTR, MIN_WIDTH_ATTR};

/// Resize handle position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Edge {
    pub const ALL: [Edge; 8] = [
        Edge::N,
        Edge::S,
        Edge::E,
        Edge::W,
        Edge::NE,
        Edge::NW,
        Edge::SE,
        Edge::SW,
    ];

    pub fn is_north(self) -> bool {
        matches!(self, Edge::N | Edge::NE | Edge::NW)
    }

    pub fn is_south(self) -> bool {
        matches!(self, Edge::S | Edge::SE | Edge::SW)
    }

    pub fn is_east(self) -> bool {
        matches!(self, Edge::E | Edge::NE | Edge::SE)
    }

    pub fn is_west(self) -> bool {
        matches!(self, Edge::W | Edge::NW | Edge::SW)
    }

    pub fn cursor(self) -> &'static str {
        match self {
            Edge::N | Edge::S => "ns-resize",
            Edge::E | Edge::W => "ew-resize",
            Edge::NE | Edge::SW => "nesw-resize",
            Edge::NW | Edge::SE => "nwse-resize",
        }
    }
}

/// The part of a window a pointer event landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitTarget {
    Header,
    Button(ButtonKind),
    Handle(Edge),
    Body,
}

impl HitTarget {
    pub fn cursor(self) -> &'static str {
        match self {
            HitTarget::Header => "move",
            HitTarget::Button(_) => "pointer",
            HitTarget::Handle(edge) => edge.cursor(),
            HitTarget::Body => "default",
        }
    }
}

/// What the current gesture does to its window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragAction {
    #[default]
    Idle,
    Move,
    Resize(Edge),
    /// Pointer went down on a header button
    Suppressed,
}

/// How a window's pointer-down handlers were installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingMode {
    /// Header moves, handles resize, buttons suppress
    Chrome,
    /// No header: the whole element is the move handle
    WholeElement,
}

/// Drag handling installed on a window by [`attach`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBinding {
    pub mode: BindingMode,
    /// Read once from the persisted attributes; never changes afterwards
    pub min_size: Size,
}

impl DragBinding {
    /// Action a pointer-down on `target` starts, if any. A press on the
    /// body of a chrome window starts nothing.
    pub fn action_for(&self, target: HitTarget) -> Option<DragAction> {
        match self.mode {
            BindingMode::WholeElement => Some(DragAction::Move),
            BindingMode::Chrome => match target {
                HitTarget::Header => Some(DragAction::Move),
                HitTarget::Handle(edge) => Some(DragAction::Resize(edge)),
                HitTarget::Button(_) => Some(DragAction::Suppressed),
                HitTarget::Body => None,
            },
        }
    }
}

/// Install drag handling on `window`, reading its minimum size from the
/// persisted attributes. Missing or malformed attributes fall back to
/// `fallback`.
pub fn attach(window: &mut Window, fallback: Size) -> DragBinding {
    let min_size = Size::new(
        read_min(window, MIN_WIDTH_ATTR, fallback.width),
        read_min(window, MIN_HEIGHT_ATTR, fallback.height),
    );
    let mode = if window.header().is_some() {
        BindingMode::Chrome
    } else {
        BindingMode::WholeElement
    };

    let binding = DragBinding { mode, min_size };
    window.binding = Some(binding);
    debug!(
        "Attached drag handling to window {} ({:?}, min {}x{})",
        window.id(),
        mode,
        min_size.width,
        min_size.height
    );
    binding
}

fn read_min(window: &Window, key: &str, fallback: f64) -> f64 {
    let parsed = window.attribute(key).and_then(|raw| {
        let raw = raw.trim();
        raw.strip_suffix("px").unwrap_or(raw).trim().parse::<f64>().ok()
    });

    match parsed {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            warn!(
                "Window {} has no usable {} attribute, using {}",
                window.id(),
                key,
                fallback
            );
            fallback
        }
    }
}

/// State of one pointer gesture, from pointer-down to pointer-up
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    window: WindowId,
    action: DragAction,
    last: Point,
    min_size: Size,
    overflow_x: f64,
    overflow_y: f64,
}

impl DragSession {
    pub fn begin(window: WindowId, action: DragAction, at: Point, min_size: Size) -> Self {
        Self {
            window,
            action,
            last: at,
            min_size,
            overflow_x: 0.0,
            overflow_y: 0.0,
        }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn action(&self) -> DragAction {
        self.action
    }

    /// Banked pointer travel per axis while pinned at a minimum
    pub fn overflow(&self) -> (f64, f64) {
        (self.overflow_x, self.overflow_y)
    }

    /// Advance the gesture to `to` and return the new geometry for a window
    /// currently at `rect`.
    pub fn step(&mut self, to: Point, rect: Rect) -> Rect {
        let dx = to.x - self.last.x;
        let dy = to.y - self.last.y;
        self.last = to;

        match self.action {
            DragAction::Idle | DragAction::Suppressed => rect,
            DragAction::Move => Rect {
                left: rect.left + dx,
                top: rect.top + dy,
                ..rect
            },
            DragAction::Resize(edge) => {
                let mut next = rect;

                if edge.is_north() || edge.is_south() {
                    let grow = if edge.is_north() { -dy } else { dy };
                    let step = clamp_axis(rect.height, self.min_size.height, grow, self.overflow_y);
                    self.overflow_y = step.overflow;
                    next.height = step.size;
                    if edge.is_north() {
                        next.top = rect.top - step.applied;
                    }
                }

                if edge.is_east() || edge.is_west() {
                    let grow = if edge.is_west() { -dx } else { dx };
                    let step = clamp_axis(rect.width, self.min_size.width, grow, self.overflow_x);
                    self.overflow_x = step.overflow;
                    next.width = step.size;
                    if edge.is_west() {
                        next.left = rect.left - step.applied;
                    }
                }

                next
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisStep {
    /// New extent
    size: f64,
    /// Change actually applied to the extent
    applied: f64,
    /// Pointer travel banked below the minimum (always <= 0)
    overflow: f64,
}

fn clamp_axis(size: f64, min: f64, grow: f64, overflow: f64) -> AxisStep {
    let wanted = size + overflow + grow;
    if wanted >= min {
        AxisStep {
            size: wanted,
            applied: wanted - size,
            overflow: 0.0,
        }
    } else {
        AxisStep {
            size: min,
            applied: min - size,
            overflow: wanted - min,
        }
    }
}
