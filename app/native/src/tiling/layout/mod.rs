//! Layout engine.
//!
//! [`calculate`] is a pure function from a container's windows to their
//! target frames. Tileable windows (resizable, not floating) are arranged
//! with the accordion rule, fixed windows (not resizable, not floating) are
//! centered when they fit, and floating windows are left alone.
//!
//! # Performance
//!
//! Layout results use `SmallVec` to avoid heap allocations for containers
//! with up to 16 windows (the common case).

pub mod accordion;
pub mod catalog;
mod gaps;
mod helpers;

pub use accordion::{accordion_frames, center_fixed};
pub use catalog::{ContainerFrames, container_count, container_frames, orientation};
pub use gaps::Gaps;
pub use helpers::{split_even, split_vertical};
use smallvec::SmallVec;

use crate::tiling::state::{Orientation, Pid, Rect, WindowId};
use crate::tiling::window::WindowInfo;

// ============================================================================
// Layout Input and Result
// ============================================================================

/// Inline capacity for layout results.
pub const LAYOUT_INLINE_CAP: usize = 16;

/// Everything the engine needs to lay out one container.
#[derive(Clone, Debug)]
pub struct LayoutInput<'a> {
    /// Windows in container ring order.
    pub windows: &'a [WindowInfo],
    /// The logically focused window. Need not be in `windows`.
    pub focused_window_id: Option<WindowId>,
    /// The container's screen rectangle.
    pub container: Rect,
    /// Accordion offset in pixels.
    pub offset: f64,
    pub orientation: Orientation,
}

/// A window's computed target frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub window_id: WindowId,
    pub owner_pid: Pid,
    pub frame: Rect,
}

/// Result of a layout calculation.
pub type LayoutResult = SmallVec<[Placement; LAYOUT_INLINE_CAP]>;

// ============================================================================
// Main Layout Function
// ============================================================================

/// Computes target frames for the windows of one container.
///
/// Tileable placements come first, in ring order, followed by fixed windows
/// that fit. Fixed windows that do not fit and floating windows get no
/// placement.
#[must_use]
pub fn calculate(input: &LayoutInput<'_>) -> LayoutResult {
    let tileable: SmallVec<[&WindowInfo; LAYOUT_INLINE_CAP]> =
        input.windows.iter().filter(|w| w.is_tileable()).collect();
    let fixed = input.windows.iter().filter(|w| w.is_fixed());

    let focus = input
        .focused_window_id
        .and_then(|id| tileable.iter().position(|w| w.id == id))
        .unwrap_or(0);

    let frames = accordion_frames(
        tileable.len(),
        focus,
        &input.container,
        input.offset,
        input.orientation,
    );

    let mut result: LayoutResult = tileable
        .iter()
        .zip(frames)
        .map(|(window, frame)| Placement {
            window_id: window.id,
            owner_pid: window.pid,
            frame,
        })
        .collect();

    result.extend(fixed.filter_map(|window| {
        center_fixed(&input.container, &window.frame).map(|frame| Placement {
            window_id: window.id,
            owner_pid: window.pid,
            frame,
        })
    }));

    result
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const CONTAINER: Rect = Rect::new(8.0, 8.0, 1904.0, 1064.0);

    fn window(id: u32) -> WindowInfo {
        WindowInfo::new(WindowId(id), 100 + i32::try_from(id).unwrap(), "App", Rect::new(0.0, 0.0, 800.0, 600.0))
    }

    fn input(windows: &[WindowInfo], focused: Option<u32>) -> LayoutInput<'_> {
        LayoutInput {
            windows,
            focused_window_id: focused.map(WindowId),
            container: CONTAINER,
            offset: 32.0,
            orientation: Orientation::Horizontal,
        }
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(calculate(&input(&[], None)).is_empty());
    }

    #[test]
    fn test_single_window_exact_rect() {
        let windows = [window(1)];
        let result = calculate(&input(&windows, Some(1)));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].frame, Rect::new(8.0, 8.0, 1904.0, 1064.0));
        assert_eq!(result[0].owner_pid, 101);
    }

    #[test]
    fn test_two_windows_focus_on_first() {
        let windows = [window(1), window(2)];
        let result = calculate(&input(&windows, Some(1)));

        assert_eq!(result[0].frame, Rect::new(8.0, 8.0, 1872.0, 1064.0));
        assert_eq!(result[1].frame, Rect::new(40.0, 8.0, 1872.0, 1064.0));
    }

    #[test]
    fn test_unknown_focus_uses_first_tileable() {
        let windows = [window(1), window(2), window(3)];
        let result = calculate(&input(&windows, Some(99)));

        // focus 0: prev is the last window
        assert_eq!(result[2].frame.x, 8.0);
        assert_eq!(result[0].frame.x, 40.0);
        assert_eq!(result[1].frame.x, 72.0);
    }

    #[test]
    fn test_floating_gets_no_placement() {
        let windows = [window(1), window(2).with_floating(true)];
        let result = calculate(&input(&windows, None));

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].frame, CONTAINER);
    }

    #[test]
    fn test_fixed_windows_centered_or_unplaced() {
        let small = window(2).with_resizable(false);
        let mut huge = window(3).with_resizable(false);
        huge.frame = Rect::new(0.0, 0.0, 3000.0, 600.0);
        let windows = [window(1), small, huge];

        let result = calculate(&input(&windows, Some(2)));

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].frame, CONTAINER);
        assert_eq!(result[1].window_id, WindowId(2));
        assert_eq!(result[1].frame, Rect::new(560.0, 240.0, 800.0, 600.0));
    }

    #[test]
    fn test_offset_is_not_clamped() {
        let windows = [window(1), window(2)];
        let mut layout = input(&windows, Some(1));
        layout.offset = 0.0;

        let result = calculate(&layout);
        assert_eq!(result[0].frame, result[1].frame);
    }
}
