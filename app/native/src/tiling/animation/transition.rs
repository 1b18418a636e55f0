//! Per-window animation targets.

use super::easing::lerp;
use crate::tiling::state::{Pid, Rect, WindowId};

/// One window's move from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationTarget {
    pub window_id: WindowId,
    pub owner_pid: Pid,
    pub start: Rect,
    pub end: Rect,
}

impl AnimationTarget {
    #[must_use]
    pub const fn new(window_id: WindowId, owner_pid: Pid, start: Rect, end: Rect) -> Self {
        Self { window_id, owner_pid, start, end }
    }

    /// Frame at eased progress `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn frame_at(&self, t: f64) -> Rect {
        let t = t.clamp(0.0, 1.0);
        Rect::new(
            lerp(self.start.x, self.end.x, t),
            lerp(self.start.y, self.end.y, t),
            lerp(self.start.width, self.end.width, t),
            lerp(self.start.height, self.end.height, t),
        )
    }

    /// Whether the window's size changes over the animation.
    #[must_use]
    pub fn involves_resize(&self) -> bool { !self.start.same_size(&self.end) }

    /// Whether start and end are effectively the same frame.
    #[must_use]
    pub fn is_stationary(&self) -> bool { self.start.approx_eq(&self.end, 0.5) }
}
