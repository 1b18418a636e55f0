//! Window to monitor assignment.

use crate::tiling::screen::MonitorInfo;
use crate::tiling::window::WindowInfo;

/// Index of the monitor a window belongs to.
///
/// The monitor whose frame contains the window's center wins. Windows whose
/// center lies on no monitor fall back to the main monitor, then the first.
#[must_use]
pub fn monitor_index_for(window: &WindowInfo, monitors: &[MonitorInfo]) -> Option<usize> {
    let (cx, cy) = window.frame.center();
    monitors
        .iter()
        .position(|m| m.frame.contains_point(cx, cy))
        .or_else(|| monitors.iter().position(|m| m.is_main))
        .or_else(|| (!monitors.is_empty()).then_some(0))
}

/// Splits windows by monitor, preserving their order.
///
/// The result has one entry per monitor, in the order of `monitors`.
#[must_use]
pub fn partition_by_monitor<'a>(
    windows: &[&'a WindowInfo],
    monitors: &[MonitorInfo],
) -> Vec<Vec<&'a WindowInfo>> {
    let mut buckets = vec![Vec::new(); monitors.len()];
    for &window in windows {
        if let Some(index) = monitor_index_for(window, monitors) {
            buckets[index].push(window);
        }
    }
    buckets
}
