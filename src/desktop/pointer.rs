//! Pointer routing into the drag engine

use log::{debug, trace, warn};

use super::Desktop;
use crate::drag::{DragSession, HitTarget};
use crate::error::{JendelaError, Result};
use crate::input::{PointerInput, PointerPhase};
use crate::window::WindowId;

impl Desktop {
    /// Pointer (or first touch) went down on `target` of window `id`.
    ///
    /// The window takes focus. If the target is bound to a drag action a new
    /// session starts, replacing any session still in progress.
    pub fn pointer_down(&mut self, id: WindowId, target: HitTarget, input: &PointerInput) -> Result<()> {
        let window = self
            .windows
            .get(&id)
            .ok_or(JendelaError::WindowNotFound(id))?;
        if window.is_closing() {
            return Err(JendelaError::WindowClosing(id));
        }
        let binding = window.binding;
        let geometry = window.geometry(self.config.viewport.size());

        self.give_focus(id);

        let Some(at) = input.position() else {
            debug!("Pointer-down on window {} without a touch point", id);
            return Ok(());
        };
        let Some((binding, action)) =
            binding.and_then(|b| b.action_for(target).map(|action| (b, action)))
        else {
            return Ok(());
        };
        if let Err(e) = geometry {
            warn!("Not dragging window {}: {}", id, e);
            return Ok(());
        }

        if let Some(previous) = self.session.take() {
            debug!(
                "Drag session on window {} taken over by window {}",
                previous.window(),
                id
            );
        }
        debug!(
            "Drag session on window {}: {:?} from ({}, {}) by {}",
            id,
            action,
            at.x,
            at.y,
            if input.is_touch() { "touch" } else { "mouse" }
        );
        self.session = Some(DragSession::begin(id, action, at, binding.min_size));
        Ok(())
    }

    /// Pointer moved anywhere in the document. Without a session this does
    /// nothing.
    pub fn pointer_move(&mut self, input: &PointerInput) -> Result<()> {
        let Some(id) = self.session.as_ref().map(|s| s.window()) else {
            return Ok(());
        };
        let Some(to) = input.position() else {
            return Ok(());
        };
        if !self.windows.contains_key(&id) {
            warn!("Dropping drag session for vanished window {}", id);
            self.session = None;
            return Ok(());
        }

        let viewport = self.config.viewport.size();
        let (Some(session), Some(window)) = (self.session.as_mut(), self.windows.get_mut(&id)) else {
            return Ok(());
        };

        let rect = match window.geometry(viewport) {
            Ok(rect) => rect,
            Err(e) => {
                warn!("Ending drag session on window {}: {}", id, e);
                self.session = None;
                return Ok(());
            }
        };
        let next = session.step(to, rect);
        if next != rect {
            window.apply_rect(rect, next);
            trace!(
                "Window {} → left {} top {} width {} height {}",
                id,
                window.left(),
                window.top(),
                window.width(),
                window.height()
            );
        }
        Ok(())
    }

    /// Pointer released. Ends the session; a release over a header button
    /// also fires that button.
    pub fn pointer_up(&mut self, released_on: Option<(WindowId, HitTarget)>) -> Result<()> {
        if let Some(session) = self.session.take() {
            debug!(
                "Drag session on window {} ended ({:?}, overflow {:?})",
                session.window(),
                session.action(),
                session.overflow()
            );
        }

        match released_on {
            Some((id, HitTarget::Button(kind))) => self.press_button(id, kind),
            _ => Ok(()),
        }
    }

    /// [`pointer_down`](Self::pointer_down) at raw coordinates, hit testing
    /// to find the window and target. Returns what was hit.
    pub fn pointer_down_at(&mut self, input: &PointerInput) -> Result<Option<(WindowId, HitTarget)>> {
        let Some(hit) = input.position().and_then(|at| self.hit_test(at)) else {
            return Ok(None);
        };
        self.pointer_down(hit.0, hit.1, input)?;
        Ok(Some(hit))
    }

    /// [`pointer_up`](Self::pointer_up) at raw coordinates.
    pub fn pointer_up_at(&mut self, input: &PointerInput) -> Result<()> {
        let hit = input.position().and_then(|at| self.hit_test(at));
        self.pointer_up(hit)
    }

    /// Route a raw event by phase, hit testing where a target is needed.
    pub fn dispatch(&mut self, phase: PointerPhase, input: &PointerInput) -> Result<()> {
        match phase {
            PointerPhase::Down => self.pointer_down_at(input).map(|_| ()),
            PointerPhase::Move => self.pointer_move(input),
            PointerPhase::Up => self.pointer_up_at(input),
        }
    }
}
