//! Style snapshots handed to the visual layer

use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};
use crate::window::{Lifecycle, VisualState, Window, WindowId};

/// Everything the visual layer needs to render one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowView {
    pub id: WindowId,
    pub title: String,
    pub class_list: String,
    pub z_index: u32,
    pub left: String,
    pub top: String,
    pub width: String,
    pub height: String,
    /// Resolved pixel geometry as presented (maximized covers the viewport).
    /// `None` when a length can't be resolved here; the raw strings above
    /// still carry it to the visual layer.
    pub rect: Option<Rect>,
    pub state: VisualState,
    pub active: bool,
    pub lifecycle: Lifecycle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl WindowView {
    pub(crate) fn capture(window: &Window, z_index: u32, viewport: Size) -> Self {
        let rect = match window.presented_rect(viewport) {
            Ok(rect) => Some(rect),
            Err(e) => {
                debug!("Window {} has no pixel geometry: {}", window.id(), e);
                None
            }
        };

        Self {
            id: window.id(),
            title: window.title().to_string(),
            class_list: window.class_list(),
            z_index,
            left: window.left().to_string(),
            top: window.top().to_string(),
            width: window.width().to_string(),
            height: window.height().to_string(),
            rect,
            state: window.state(),
            active: window.is_active(),
            lifecycle: window.lifecycle(),
            transition: window.transition().map(|t| t.to_string()),
            transform: window.close_effect().map(|e| e.transform()),
            opacity: window.close_effect().map(|e| e.opacity),
        }
    }
}
