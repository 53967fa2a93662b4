//! Notifications emitted by the desktop

use serde::{Deserialize, Serialize};

use crate::window::{VisualState, WindowId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WindowEvent {
    Created { window: WindowId },
    Focused { window: WindowId },
    /// Lost focus; the window is now rendered `inactive`
    Blurred { window: WindowId },
    Raised { window: WindowId, z_index: u32 },
    StateChanged { window: WindowId, state: VisualState },
    /// Exit animation started
    Closing { window: WindowId },
    /// Detached from the desktop and the stack
    Removed { window: WindowId },
}

impl WindowEvent {
    pub fn window(&self) -> WindowId {
        match self {
            WindowEvent::Created { window }
            | WindowEvent::Focused { window }
            | WindowEvent::Blurred { window }
            | WindowEvent::Raised { window, .. }
            | WindowEvent::StateChanged { window, .. }
            | WindowEvent::Closing { window }
            | WindowEvent::Removed { window } => *window,
        }
    }
}

pub(crate) type Listener = Box<dyn Fn(&WindowEvent) + Send + Sync>;
