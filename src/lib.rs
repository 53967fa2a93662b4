//! # Jendela Window Library
//!
//! Desktop-style window chrome for panels inside a document: draggable,
//! resizable, stackable windows with a title bar, minimize/maximize/close
//! controls and themeable skins.
//!
//! ## Architecture
//!
//! Jendela is headless. The host feeds it pointer, focus and button events
//! plus a clock, and reads back geometry and style snapshots:
//! - `desktop`: Controller owning windows, focus and the drag session
//! - `drag`: Move/resize engine with minimum-size clamping
//! - `stack`: Z-order stack manager
//! - `window`: Window records, creation options and header buttons
//! - `scheduler`: Virtual clock for deferred animation work
//! - `config`: Configuration parsing and management
//! - `scenario`: Scripted event replay
//!
//! ## Usage
//!
//! ```rust
//! use jendela::{Desktop, JendelaConfig, WindowOptions};
//!
//! let mut desktop = Desktop::new(JendelaConfig::default());
//! let notes = desktop.create_window(WindowOptions::new().title("Notes").theme("xp"));
//! let todo = desktop.create_window(WindowOptions::new().title("Todo"));
//!
//! desktop.focus(notes).unwrap();
//! assert!(desktop.z_index(notes) > desktop.z_index(todo));
//! ```

pub mod animation;
pub mod config;
pub mod desktop;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod input;
pub mod scenario;
pub mod scheduler;
pub mod stack;
pub mod theme;
pub mod window;

// Re-export main types for easy access
pub use config::JendelaConfig;
pub use desktop::{Desktop, WindowEvent, WindowView};
pub use drag::{DragAction, Edge, HitTarget};
pub use error::{JendelaError, Result};
pub use geometry::{Length, Point, Rect, Size};
pub use input::{PointerInput, PointerPhase};
pub use scenario::{Scenario, Step};
pub use stack::WindowStack;
pub use theme::Theme;
pub use window::{
    ButtonKind, ExistingPanel, Lifecycle, VisualState, Window, WindowId, WindowOptions,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
