//! Window records
//!
//! A [`Window`] is one live on-screen panel: its chrome, its geometry as
//! written to the style layer, its visual state and the bookkeeping for
//! pending animations. Windows are owned by the [`Desktop`](crate::Desktop);
//! everything outside refers to them by [`WindowId`].

mod header;
mod options;

pub use header::{ButtonFlags, ButtonKind, Header, HeaderButton};
pub use options::{WindowOptions, WindowSpec};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::animation::{CloseEffect, Transition};
use crate::drag::DragBinding;
use crate::error::{JendelaError, Result};
use crate::geometry::{format_px, Length, Rect, Size};
use crate::scheduler::TaskHandle;
use crate::theme::Theme;

/// Persisted attribute holding the minimum width
pub const MIN_WIDTH_ATTR: &str = "data-min-width";
/// Persisted attribute holding the minimum height
pub const MIN_HEIGHT_ATTR: &str = "data-min-height";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Presentation state driven by the header buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

/// A requested change of [`VisualState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateChange {
    Minimize,
    Maximize,
    Restore,
}

impl VisualState {
    /// Apply `change`, rejecting transitions that have no meaning.
    ///
    /// Minimizing is allowed from any state (a maximized window drops its
    /// maximized look). Maximize only applies to a normal window and restore
    /// only to a maximized or minimized one.
    pub fn apply(self, change: StateChange) -> Result<VisualState> {
        match (self, change) {
            (_, StateChange::Minimize) => Ok(VisualState::Minimized),
            (VisualState::Normal, StateChange::Maximize) => Ok(VisualState::Maximized),
            (VisualState::Maximized | VisualState::Minimized, StateChange::Restore) => {
                Ok(VisualState::Normal)
            }
            (from, change) => Err(JendelaError::InvalidTransition { from, change }),
        }
    }

    /// What the maximize/restore button does from this state
    pub fn toggle_maximize(self) -> StateChange {
        match self {
            VisualState::Maximized | VisualState::Minimized => StateChange::Restore,
            VisualState::Normal => StateChange::Maximize,
        }
    }

    pub fn class_name(self) -> Option<&'static str> {
        match self {
            VisualState::Normal => None,
            VisualState::Maximized => Some("maximized"),
            VisualState::Minimized => Some("minimized"),
        }
    }
}

impl fmt::Display for VisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VisualState::Normal => "normal",
            VisualState::Maximized => "maximized",
            VisualState::Minimized => "minimized",
        })
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StateChange::Minimize => "minimize",
            StateChange::Maximize => "maximize",
            StateChange::Restore => "restore",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Open,
    /// Exit animation running; removal is scheduled
    Closing,
}

/// Deferred work scheduled on behalf of a window
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PendingTasks {
    pub clear_transition: Option<TaskHandle>,
    pub removal: Option<TaskHandle>,
}

impl PendingTasks {
    pub fn handles(&self) -> impl Iterator<Item = TaskHandle> + '_ {
        self.clear_transition.iter().chain(self.removal.iter()).copied()
    }
}

/// A panel that already exists when the desktop starts, re-attached by
/// [`Desktop::adopt`](crate::Desktop::adopt).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExistingPanel {
    /// `None` for a headerless panel, which is dragged by its whole body
    pub title: Option<String>,
    pub buttons: ButtonFlags,
    pub theme: Theme,
    pub body: String,
    pub left: Length,
    pub top: Length,
    pub width: Length,
    pub height: Length,
    /// Element attributes, including the persisted minimum size
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    id: WindowId,
    theme: Theme,
    body: String,
    header: Option<Header>,
    pub(crate) left: Length,
    pub(crate) top: Length,
    pub(crate) width: Length,
    pub(crate) height: Length,
    attributes: BTreeMap<String, String>,
    state: VisualState,
    active: bool,
    lifecycle: Lifecycle,
    pub(crate) binding: Option<DragBinding>,
    pub(crate) transition: Option<Transition>,
    pub(crate) close_effect: Option<CloseEffect>,
    pub(crate) tasks: PendingTasks,
}

impl Window {
    pub(crate) fn new(id: WindowId, spec: WindowSpec) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(MIN_WIDTH_ATTR.to_string(), format_px(spec.min_size.width));
        attributes.insert(MIN_HEIGHT_ATTR.to_string(), format_px(spec.min_size.height));

        Self {
            id,
            theme: spec.theme,
            body: spec.body,
            header: Some(Header::new(spec.title, spec.buttons)),
            left: spec.left,
            top: spec.top,
            width: spec.width,
            height: spec.height,
            attributes,
            state: VisualState::Normal,
            active: true,
            lifecycle: Lifecycle::Open,
            binding: None,
            transition: None,
            close_effect: None,
            tasks: PendingTasks::default(),
        }
    }

    pub(crate) fn from_panel(id: WindowId, panel: ExistingPanel) -> Self {
        Self {
            id,
            theme: panel.theme,
            body: panel.body,
            header: panel.title.map(|title| Header::new(title, panel.buttons)),
            left: panel.left,
            top: panel.top,
            width: panel.width,
            height: panel.height,
            attributes: panel.attributes,
            state: VisualState::Normal,
            active: true,
            lifecycle: Lifecycle::Open,
            binding: None,
            transition: None,
            close_effect: None,
            tasks: PendingTasks::default(),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        self.header.as_ref().map(|h| h.title.as_str()).unwrap_or("")
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    pub(crate) fn header_mut(&mut self) -> Option<&mut Header> {
        self.header.as_mut()
    }

    pub fn state(&self) -> VisualState {
        self.state
    }

    /// `false` once the window has lost focus (rendered with `inactive`)
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_closing(&self) -> bool {
        self.lifecycle == Lifecycle::Closing
    }

    pub(crate) fn mark_closing(&mut self) {
        self.lifecycle = Lifecycle::Closing;
    }

    pub fn left(&self) -> &Length {
        &self.left
    }

    pub fn top(&self) -> &Length {
        &self.top
    }

    pub fn width(&self) -> &Length {
        &self.width
    }

    pub fn height(&self) -> &Length {
        &self.height
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Minimum size captured when drag handling was attached
    pub fn min_size(&self) -> Option<Size> {
        self.binding.as_ref().map(|b| b.min_size)
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn close_effect(&self) -> Option<&CloseEffect> {
        self.close_effect.as_ref()
    }

    pub(crate) fn change_state(&mut self, change: StateChange) -> Result<VisualState> {
        self.state = self.state.apply(change)?;
        Ok(self.state)
    }

    /// Resolve the stored lengths to pixels against `viewport`.
    pub fn geometry(&self, viewport: Size) -> Result<Rect> {
        Ok(Rect {
            left: self.left.resolve(viewport.width, viewport)?,
            top: self.top.resolve(viewport.height, viewport)?,
            width: self.width.resolve(viewport.width, viewport)?,
            height: self.height.resolve(viewport.height, viewport)?,
        })
    }

    /// Rectangle the window occupies on screen; maximized windows cover the
    /// whole viewport.
    pub fn presented_rect(&self, viewport: Size) -> Result<Rect> {
        match self.state {
            VisualState::Maximized => Ok(Rect::new(0.0, 0.0, viewport.width, viewport.height)),
            _ => self.geometry(viewport),
        }
    }

    /// Write back the axes of `next` that differ from `current`. Untouched
    /// axes keep whatever length expression they had.
    pub(crate) fn apply_rect(&mut self, current: Rect, next: Rect) {
        if next.left != current.left {
            self.left = Length::Px(next.left);
        }
        if next.top != current.top {
            self.top = Length::Px(next.top);
        }
        if next.width != current.width {
            self.width = Length::Px(next.width);
        }
        if next.height != current.height {
            self.height = Length::Px(next.height);
        }
    }

    /// Root element classes, e.g. `jendela jendela-xp maximized inactive`
    pub fn class_list(&self) -> String {
        let mut classes = vec!["jendela", self.theme.skin_class()];
        if let Some(state) = self.state.class_name() {
            classes.push(state);
        }
        if !self.active {
            classes.push("inactive");
        }
        classes.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowConfig;

    fn window() -> Window {
        let spec = WindowOptions::new().title("t").resolve(&WindowConfig::default());
        Window::new(WindowId(1), spec)
    }

    #[test]
    fn test_state_transitions() {
        use StateChange::*;
        use VisualState::*;

        assert_eq!(Normal.apply(Maximize), Ok(Maximized));
        assert_eq!(Normal.apply(Minimize), Ok(Minimized));
        assert_eq!(Maximized.apply(Minimize), Ok(Minimized));
        assert_eq!(Maximized.apply(Restore), Ok(Normal));
        assert_eq!(Minimized.apply(Restore), Ok(Normal));
        assert_eq!(Minimized.apply(Minimize), Ok(Minimized));
        assert!(Normal.apply(Restore).is_err());
        assert!(Maximized.apply(Maximize).is_err());
        assert!(Minimized.apply(Maximize).is_err());
    }

    #[test]
    fn test_toggle_is_three_way() {
        assert_eq!(VisualState::Normal.toggle_maximize(), StateChange::Maximize);
        assert_eq!(VisualState::Maximized.toggle_maximize(), StateChange::Restore);
        assert_eq!(VisualState::Minimized.toggle_maximize(), StateChange::Restore);
    }

    #[test]
    fn test_persisted_minimums() {
        let window = window();
        assert_eq!(window.attribute(MIN_WIDTH_ATTR), Some("200"));
        assert_eq!(window.attribute(MIN_HEIGHT_ATTR), Some("200"));
    }

    #[test]
    fn test_class_list_tracks_state() {
        let mut window = window();
        assert_eq!(window.class_list(), "jendela jendela-classic");
        window.change_state(StateChange::Maximize).unwrap();
        window.set_active(false);
        assert_eq!(window.class_list(), "jendela jendela-classic maximized inactive");
    }

    #[test]
    fn test_apply_rect_keeps_untouched_expressions() {
        let mut window = window();
        let viewport = Size::new(1000.0, 800.0);
        let current = window.geometry(viewport).unwrap();
        assert_eq!(current, Rect::new(400.0, 300.0, 200.0, 200.0));

        let next = Rect {
            left: 410.0,
            ..current
        };
        window.apply_rect(current, next);
        assert_eq!(window.left(), &Length::Px(410.0));
        assert_eq!(window.top().to_string(), "calc(50% - 100px)");
    }

    #[test]
    fn test_maximized_covers_viewport() {
        let mut window = window();
        window.change_state(StateChange::Maximize).unwrap();
        let viewport = Size::new(1280.0, 720.0);
        assert_eq!(
            window.presented_rect(viewport).unwrap(),
            Rect::new(0.0, 0.0, 1280.0, 720.0)
        );
    }
}
