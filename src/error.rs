//! Error types for window operations

use thiserror::Error;

use crate::window::{StateChange, VisualState, WindowId};

/// Errors raised by [`Desktop`](crate::Desktop) operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JendelaError {
    #[error("window {0} not found")]
    WindowNotFound(WindowId),

    #[error("window {0} is closing")]
    WindowClosing(WindowId),

    #[error("cannot {change} a {from} window")]
    InvalidTransition {
        from: VisualState,
        change: StateChange,
    },

    #[error("invalid length expression `{0}`")]
    InvalidLength(String),
}

pub type Result<T> = std::result::Result<T, JendelaError>;
