//! Window order that survives retiles.
//!
//! Containers are filled from this order, so cycling keeps a stable notion
//! of next and previous while windows come and go or change z-order.

use crate::tiling::state::WindowId;
use crate::tiling::window::WindowInfo;

/// Discovery-order list of managed window ids.
#[derive(Clone, Debug, Default)]
pub struct StableOrder {
    ids: Vec<WindowId>,
}

impl StableOrder {
    #[must_use]
    pub const fn new() -> Self { Self { ids: Vec::new() } }

    /// Drops ids that are no longer present and appends new ones in the
    /// order given. Existing members are never reordered.
    pub fn update(&mut self, present: &[WindowId]) {
        self.ids.retain(|id| present.contains(id));
        for &id in present {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    /// Returns `windows` sorted by this order. Unknown windows go last, in
    /// their original order.
    #[must_use]
    pub fn ordered<'a>(&self, windows: &'a [WindowInfo]) -> Vec<&'a WindowInfo> {
        let mut sorted: Vec<&WindowInfo> = windows.iter().collect();
        sorted.sort_by_key(|w| self.position(w.id).unwrap_or(usize::MAX));
        sorted
    }

    #[must_use]
    pub fn position(&self, id: WindowId) -> Option<usize> { self.ids.iter().position(|&w| w == id) }

    #[must_use]
    pub fn as_slice(&self) -> &[WindowId] { &self.ids }

    #[must_use]
    pub fn len(&self) -> usize { self.ids.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    pub fn clear(&mut self) { self.ids.clear(); }
}
