//! Container: an ordered ring of windows with a focus pointer.
//!
//! Membership order is insertion order and is the order used for cycling.
//! Focus is tracked by identity rather than by index, so insertions and
//! removals never need to re-derive it.
//!
//! Invariant: `focused_window_id` is `None` iff `window_ids` is empty, and
//! otherwise names a member of `window_ids`. Every operation is a no-op on
//! invalid input.

use smallvec::SmallVec;

use super::types::{ContainerId, Rect, WindowId};

/// Inline capacity for container membership.
pub const WINDOW_LIST_INLINE_CAP: usize = 8;

/// Window membership list, stack-allocated for small containers.
pub type WindowIdList = SmallVec<[WindowId; WINDOW_LIST_INLINE_CAP]>;

/// A rectangular region of a monitor holding a ring of windows.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    pub id: ContainerId,
    pub frame: Rect,
    window_ids: WindowIdList,
    focused_window_id: Option<WindowId>,
}

impl Container {
    /// Creates an empty container.
    #[must_use]
    pub const fn new(id: ContainerId, frame: Rect) -> Self {
        Self {
            id,
            frame,
            window_ids: SmallVec::new_const(),
            focused_window_id: None,
        }
    }

    #[must_use]
    pub fn window_ids(&self) -> &[WindowId] { &self.window_ids }

    #[must_use]
    pub const fn focused_window_id(&self) -> Option<WindowId> { self.focused_window_id }

    #[must_use]
    pub fn len(&self) -> usize { self.window_ids.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.window_ids.is_empty() }

    #[must_use]
    pub fn contains(&self, window_id: WindowId) -> bool { self.window_ids.contains(&window_id) }

    fn index_of(&self, window_id: WindowId) -> Option<usize> {
        self.window_ids.iter().position(|&id| id == window_id)
    }

    fn focused_index(&self) -> Option<usize> {
        self.focused_window_id.and_then(|id| self.index_of(id))
    }

    /// Appends a window if absent. The first window becomes focused.
    pub fn add_window(&mut self, window_id: WindowId) {
        if self.contains(window_id) {
            return;
        }
        self.window_ids.push(window_id);
        if self.focused_window_id.is_none() {
            self.focused_window_id = Some(window_id);
        }
    }

    /// Removes a window.
    ///
    /// When the removed window was focused, focus moves to the window that
    /// now occupies its index, wrapping to the first window.
    pub fn remove_window(&mut self, window_id: WindowId) {
        let Some(index) = self.index_of(window_id) else {
            return;
        };
        self.window_ids.remove(index);

        if self.focused_window_id != Some(window_id) {
            return;
        }
        self.focused_window_id = if self.window_ids.is_empty() {
            None
        } else if index < self.window_ids.len() {
            Some(self.window_ids[index])
        } else {
            Some(self.window_ids[0])
        };
    }

    /// Focuses a member window. Returns false when the window is not a member.
    pub fn focus_window(&mut self, window_id: WindowId) -> bool {
        if !self.contains(window_id) {
            return false;
        }
        self.focused_window_id = Some(window_id);
        true
    }

    /// Advances focus to the next window, wrapping around.
    pub fn cycle_next(&mut self) { self.step_focus(true); }

    /// Moves focus to the previous window, wrapping around.
    pub fn cycle_previous(&mut self) { self.step_focus(false); }

    fn step_focus(&mut self, forward: bool) {
        let len = self.window_ids.len();
        if len < 2 {
            return;
        }
        let Some(current) = self.focused_index() else {
            return;
        };
        let target = if forward { (current + 1) % len } else { (current + len - 1) % len };
        self.focused_window_id = Some(self.window_ids[target]);
    }

    /// Removes and returns the focused window. The caller re-inserts it elsewhere.
    pub fn move_focused_window(&mut self) -> Option<WindowId> {
        let focused = self.focused_window_id?;
        self.remove_window(focused);
        Some(focused)
    }

    /// Returns `(prev, focused, next)` around the focused window.
    ///
    /// With one window all three are the same id; with two, prev and next
    /// coincide.
    #[must_use]
    pub fn ring_neighbors(&self) -> Option<(WindowId, WindowId, WindowId)> {
        let index = self.focused_index()?;
        let len = self.window_ids.len();
        Some((
            self.window_ids[(index + len - 1) % len],
            self.window_ids[index],
            self.window_ids[(index + 1) % len],
        ))
    }

    /// Drops every window, leaving the container empty.
    pub fn clear(&mut self) {
        self.window_ids.clear();
        self.focused_window_id = None;
    }

    /// Returns true when the focus invariant holds.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        match self.focused_window_id {
            None => self.window_ids.is_empty(),
            Some(id) => self.contains(id),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
