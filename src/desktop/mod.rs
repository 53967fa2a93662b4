//! The desktop: owner of every live window
//!
//! [`Desktop`] ties the pieces together. It creates windows from options,
//! keeps them in a [`WindowStack`], routes pointer input into the single
//! active [`DragSession`], runs header button actions, tracks focus and
//! drives deferred animation work off its [`Scheduler`].
//!
//! Everything is single-threaded and synchronous: the host calls in with
//! events and advances the clock, then reads back [`WindowView`]s.

mod events;
mod pointer;
mod view;

pub use events::WindowEvent;
pub use view::WindowView;

use log::{debug, info, warn};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::animation::{CloseEffect, Transition};
use crate::config::JendelaConfig;
use crate::drag::{self, DragSession, HitTarget};
use crate::error::{JendelaError, Result};
use crate::geometry::Point;
use crate::scheduler::Scheduler;
use crate::stack::WindowStack;
use crate::window::{
    ButtonKind, ExistingPanel, StateChange, VisualState, Window, WindowId, WindowOptions,
};
use events::Listener;

/// Work deferred until an animation has run its course
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    ClearTransition(WindowId),
    FinishClose(WindowId),
}

pub struct Desktop {
    config: JendelaConfig,

    /// Live windows by ID
    windows: HashMap<WindowId, Window>,

    /// Stacking order (bottom to top)
    stack: WindowStack,

    scheduler: Scheduler<Deferred>,

    /// The one gesture in progress, whichever window it belongs to
    session: Option<DragSession>,

    focused: Option<WindowId>,

    next_window_id: u64,

    listeners: Vec<Listener>,
}

impl Desktop {
    pub fn new(config: JendelaConfig) -> Self {
        info!(
            "🖥️ Desktop ready: viewport {}x{}, z-index base {}",
            config.viewport.width, config.viewport.height, config.stack.z_index_base
        );

        Self {
            stack: WindowStack::new(config.stack.z_index_base),
            config,
            windows: HashMap::new(),
            scheduler: Scheduler::new(),
            session: None,
            focused: None,
            next_window_id: 1,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &JendelaConfig {
        &self.config
    }

    /// Create a window, put it on top of the stack and give it focus.
    pub fn create_window(&mut self, options: WindowOptions) -> WindowId {
        let spec = options.resolve(&self.config.window);
        let id = self.allocate_id();

        let mut window = Window::new(id, spec);
        drag::attach(&mut window, self.config.window.min_size());
        warn_unresolvable(&window);
        info!(
            "🪟 Created window {} \"{}\" ({})",
            id,
            window.title(),
            window.theme()
        );

        self.windows.insert(id, window);
        self.stack.register(id);
        self.emit(WindowEvent::Created { window: id });
        self.give_focus(id);
        id
    }

    /// Re-attach drag handling to a panel that existed before the desktop
    /// did. The panel is stacked on top but does not take focus.
    pub fn adopt(&mut self, panel: ExistingPanel) -> WindowId {
        let id = self.allocate_id();

        let mut window = Window::from_panel(id, panel);
        drag::attach(&mut window, self.config.window.min_size());
        warn_unresolvable(&window);
        info!("📎 Adopted existing panel as window {}", id);

        self.windows.insert(id, window);
        self.stack.register(id);
        self.emit(WindowEvent::Created { window: id });
        id
    }

    // === Focus and stacking ===

    /// Focus a window: the previously focused one turns inactive and this
    /// one is raised to the top.
    pub fn focus(&mut self, id: WindowId) -> Result<()> {
        self.window_ref(id)?;
        self.give_focus(id);
        Ok(())
    }

    /// Take focus away from a window, marking it inactive.
    pub fn blur(&mut self, id: WindowId) -> Result<()> {
        self.window_ref(id)?;
        self.drop_focus(id);
        Ok(())
    }

    /// Raise a window without touching focus. Returns whether the order
    /// changed.
    pub fn bring_to_front(&mut self, id: WindowId) -> Result<bool> {
        self.window_ref(id)?;
        Ok(self.raise(id))
    }

    fn give_focus(&mut self, id: WindowId) {
        let changed = self.focused != Some(id);
        if let Some(previous) = self.focused.filter(|&prev| prev != id) {
            self.drop_focus(previous);
        }

        self.focused = Some(id);
        if let Some(window) = self.windows.get_mut(&id) {
            window.set_active(true);
        }
        self.raise(id);

        if changed {
            debug!("Focused window {}", id);
            self.emit(WindowEvent::Focused { window: id });
        }
    }

    fn drop_focus(&mut self, id: WindowId) {
        if let Some(window) = self.windows.get_mut(&id) {
            window.set_active(false);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        debug!("Window {} is inactive", id);
        self.emit(WindowEvent::Blurred { window: id });
    }

    fn raise(&mut self, id: WindowId) -> bool {
        if !self.stack.bring_to_front(id) {
            return false;
        }
        let z_index = self.stack.z_index(id).unwrap_or(self.stack.base());
        debug!("Raised window {} to z-index {}", id, z_index);
        self.emit(WindowEvent::Raised { window: id, z_index });
        true
    }

    // === Header buttons and visual state ===

    /// Run the action of a header button, as on release over it. Buttons
    /// the window doesn't have, or whose listeners were detached by close
    /// teardown, do nothing.
    pub fn press_button(&mut self, id: WindowId, kind: ButtonKind) -> Result<()> {
        let window = self.window_ref(id)?;
        let bound = window.header().is_some_and(|h| h.is_bound(kind));
        if !bound {
            debug!("Ignoring {:?} on window {}: no listener", kind, id);
            return Ok(());
        }

        match kind {
            ButtonKind::Minimize => self.minimize(id).map(|_| ()),
            ButtonKind::Resize => self.toggle_maximize(id).map(|_| ()),
            ButtonKind::Close => self.close(id),
        }
    }

    pub fn minimize(&mut self, id: WindowId) -> Result<VisualState> {
        self.change_state(id, StateChange::Minimize)
    }

    /// Maximized or minimized windows go back to normal; normal windows
    /// maximize.
    pub fn toggle_maximize(&mut self, id: WindowId) -> Result<VisualState> {
        let change = self.window_ref(id)?.state().toggle_maximize();
        self.change_state(id, change)
    }

    /// Apply a validated state change and animate into it.
    pub fn change_state(&mut self, id: WindowId, change: StateChange) -> Result<VisualState> {
        let window = self.open_window_mut(id)?;
        let state = window.change_state(change)?;
        debug!("Window {} {} → {}", id, change, state);

        self.animate(id);
        self.emit(WindowEvent::StateChanged { window: id, state });
        Ok(state)
    }

    fn animate(&mut self, id: WindowId) {
        let duration = self.config.animation.state_change();
        let Some(window) = self.windows.get_mut(&id) else {
            return;
        };

        let handle = self
            .scheduler
            .schedule(duration, Deferred::ClearTransition(id));
        if let Some(stale) = window.tasks.clear_transition.replace(handle) {
            self.scheduler.cancel(stale);
        }
        window.transition = Some(Transition::geometry(duration));
    }

    // === Closing ===

    /// Start the exit animation; the window is removed once it finishes.
    /// Closing a window that is already closing does nothing.
    pub fn close(&mut self, id: WindowId) -> Result<()> {
        let animation = &self.config.animation;
        let window = self
            .windows
            .get_mut(&id)
            .ok_or(JendelaError::WindowNotFound(id))?;

        if window.is_closing() {
            debug!("Window {} is already closing", id);
            return Ok(());
        }

        window.mark_closing();
        window.transition = Some(Transition::close(animation));
        window.close_effect = Some(CloseEffect::from_config(animation));
        if let Some(stale) = window.tasks.clear_transition.take() {
            self.scheduler.cancel(stale);
        }
        window.tasks.removal = Some(
            self.scheduler
                .schedule(animation.close_removal(), Deferred::FinishClose(id)),
        );

        info!("👋 Closing window {}", id);
        self.emit(WindowEvent::Closing { window: id });
        Ok(())
    }

    /// Remove a window immediately, cancelling any animation work still
    /// queued for it.
    pub fn destroy(&mut self, id: WindowId) -> Result<Window> {
        self.remove_window(id)
            .ok_or(JendelaError::WindowNotFound(id))
    }

    fn remove_window(&mut self, id: WindowId) -> Option<Window> {
        let mut window = self.windows.remove(&id)?;

        for handle in window.tasks.handles() {
            self.scheduler.cancel(handle);
        }
        window.tasks = Default::default();

        let detached = window.header_mut().map_or(0, |h| h.detach_listeners());
        self.stack.remove(id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.session.as_ref().is_some_and(|s| s.window() == id) {
            self.session = None;
        }

        info!("🗑️ Removed window {} ({} button listeners detached)", id, detached);
        self.emit(WindowEvent::Removed { window: id });
        Some(window)
    }

    // === Time ===

    /// Advance the clock and run whatever deferred work fell due. Returns the
    /// number of tasks run.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let due = self.scheduler.advance(elapsed);
        let count = due.len();

        for (handle, task) in due {
            match task {
                Deferred::ClearTransition(id) => {
                    if let Some(window) = self.windows.get_mut(&id) {
                        if window.tasks.clear_transition == Some(handle) {
                            window.tasks.clear_transition = None;
                            window.transition = None;
                        }
                    }
                }
                Deferred::FinishClose(id) => {
                    if let Some(window) = self.windows.get_mut(&id) {
                        window.tasks.removal = None;
                    }
                    self.remove_window(id);
                }
            }
        }

        count
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    // === Queries ===

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    /// Live windows, bottom to top
    pub fn windows(&self) -> impl Iterator<Item = &Window> + '_ {
        self.stack
            .order()
            .iter()
            .filter_map(move |id| self.windows.get(id))
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn stack(&self) -> &WindowStack {
        &self.stack
    }

    pub fn z_index(&self, id: WindowId) -> Option<u32> {
        self.stack.z_index(id)
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn view(&self, id: WindowId) -> Result<WindowView> {
        let window = self.window_ref(id)?;
        let z_index = self
            .stack
            .z_index(id)
            .ok_or(JendelaError::WindowNotFound(id))?;
        Ok(WindowView::capture(window, z_index, self.config.viewport.size()))
    }

    /// Snapshots of every window, bottom to top
    pub fn views(&self) -> Vec<WindowView> {
        let viewport = self.config.viewport.size();
        self.stack
            .z_indices()
            .filter_map(|(id, z)| self.windows.get(&id).map(|w| (w, z)))
            .map(|(window, z)| WindowView::capture(window, z, viewport))
            .collect()
    }

    /// Cursor to show for a pointer hovering at `point`
    pub fn cursor_at(&self, point: Point) -> &'static str {
        self.hit_test(point)
            .map_or("default", |(_, target)| target.cursor())
    }

    /// Top-most window under `point` and the part of it that was hit
    pub fn hit_test(&self, point: Point) -> Option<(WindowId, HitTarget)> {
        let viewport = self.config.viewport.size();
        for id in self.stack.order().iter().rev() {
            let Some(window) = self.windows.get(id) else {
                continue;
            };
            let rect = match window.presented_rect(viewport) {
                Ok(rect) => rect,
                Err(e) => {
                    warn!("Skipping window {} in hit test: {}", id, e);
                    continue;
                }
            };
            if let Some(target) = drag::hit_test(rect, window.header(), &self.config.chrome, point) {
                return Some((*id, target));
            }
        }
        None
    }

    /// Register a callback for every [`WindowEvent`]
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&WindowEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // === Helpers ===

    fn allocate_id(&mut self) -> WindowId {
        let id = WindowId(self.next_window_id);
        self.next_window_id += 1;
        id
    }

    fn window_ref(&self, id: WindowId) -> Result<&Window> {
        self.windows.get(&id).ok_or(JendelaError::WindowNotFound(id))
    }

    fn open_window_mut(&mut self, id: WindowId) -> Result<&mut Window> {
        let window = self
            .windows
            .get_mut(&id)
            .ok_or(JendelaError::WindowNotFound(id))?;
        if window.is_closing() {
            return Err(JendelaError::WindowClosing(id));
        }
        Ok(window)
    }

    fn emit(&self, event: WindowEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for Desktop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Desktop")
            .field("windows", &self.windows.len())
            .field("stack", &self.stack)
            .field("now", &self.scheduler.now())
            .field("pending_tasks", &self.scheduler.pending())
            .field("session", &self.session)
            .field("focused", &self.focused)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Lengths the engine can't turn into pixels are kept and handed to the
/// visual layer verbatim, but the window won't move or resize.
fn warn_unresolvable(window: &Window) {
    let lengths = [
        ("left", window.left()),
        ("top", window.top()),
        ("width", window.width()),
        ("height", window.height()),
    ];
    for (name, length) in lengths {
        if let Err(e) = length.validate() {
            warn!(
                "Window {} {} `{}` can't be resolved ({}); dragging is disabled",
                window.id(),
                name,
                length,
                e
            );
        }
    }
}
