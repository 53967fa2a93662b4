//! Window stacking order
//!
//! [`WindowStack`] keeps live windows ordered from bottom to top. A window's
//! z-index is always its position in the stack plus a fixed base, so every
//! window sits strictly above everything registered or raised before it.

use std::collections::HashMap;

use crate::window::WindowId;

/// Stacking order of live windows.
///
/// # Examples
///
/// ```
/// use jendela::stack::WindowStack;
/// use jendela::WindowId;
///
/// let mut stack = WindowStack::new(99);
/// stack.register(WindowId(1));
/// stack.register(WindowId(2));
///
/// assert_eq!(stack.top(), Some(WindowId(2)));
/// assert_eq!(stack.z_index(WindowId(1)), Some(99));
/// assert_eq!(stack.z_index(WindowId(2)), Some(100));
/// ```
#[derive(Debug, Clone)]
pub struct WindowStack {
    /// Windows ordered from bottom to top
    windows: Vec<WindowId>,

    /// Window → position in `windows`
    positions: HashMap<WindowId, usize>,

    /// z-index of the bottom-most window
    base: u32,
}

impl WindowStack {
    pub fn new(base: u32) -> Self {
        Self {
            windows: Vec::new(),
            positions: HashMap::new(),
            base,
        }
    }

    /// Appends a window on top. Returns `false` if it was already registered.
    pub fn register(&mut self, window_id: WindowId) -> bool {
        if self.positions.contains_key(&window_id) {
            return false;
        }

        self.positions.insert(window_id, self.windows.len());
        self.windows.push(window_id);
        true
    }

    /// Removes a window, returning its former position.
    pub fn remove(&mut self, window_id: WindowId) -> Option<usize> {
        let pos = self.positions.remove(&window_id)?;
        self.windows.remove(pos);
        self.rebuild_positions();
        Some(pos)
    }

    /// Moves a window to the top.
    ///
    /// Returns `true` only if the order changed: raising the top-most window,
    /// or one that isn't registered, is a no-op.
    pub fn bring_to_front(&mut self, window_id: WindowId) -> bool {
        match self.positions.get(&window_id) {
            Some(&pos) if pos + 1 != self.windows.len() => {
                self.windows.remove(pos);
                self.windows.push(window_id);
                self.rebuild_positions();
                true
            }
            _ => false,
        }
    }

    pub fn z_index(&self, window_id: WindowId) -> Option<u32> {
        self.positions
            .get(&window_id)
            .map(|&pos| self.z_at(pos))
    }

    /// `(window, z-index)` pairs, bottom to top
    pub fn z_indices(&self) -> impl Iterator<Item = (WindowId, u32)> + '_ {
        self.windows
            .iter()
            .enumerate()
            .map(move |(pos, &id)| (id, self.z_at(pos)))
    }

    /// Windows in bottom-to-top order
    pub fn order(&self) -> &[WindowId] {
        &self.windows
    }

    pub fn top(&self) -> Option<WindowId> {
        self.windows.last().copied()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn contains(&self, window_id: WindowId) -> bool {
        self.positions.contains_key(&window_id)
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    /// z-index for a stack position, pinned at `u32::MAX`
    fn z_at(&self, pos: usize) -> u32 {
        u32::try_from(pos)
            .unwrap_or(u32::MAX)
            .saturating_add(self.base)
    }

    fn rebuild_positions(&mut self) {
        self.positions.clear();
        for (pos, &id) in self.windows.iter().enumerate() {
            self.positions.insert(id, pos);
        }
    }
}
