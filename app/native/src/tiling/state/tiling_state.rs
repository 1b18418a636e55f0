//! Registry of per-monitor tiling states.
//!
//! States are keyed by monitor identity rather than by a live display handle,
//! so a monitor that disconnects and comes back finds its containers intact.
//! Only [`TilingState::reset`] discards them.

use std::collections::{HashMap, HashSet};

use super::monitor_state::MonitorTilingState;
use super::types::{MonitorId, WindowId};

/// All monitor states known to the tiler.
#[derive(Debug, Default)]
pub struct TilingState {
    monitors: HashMap<MonitorId, MonitorTilingState>,
}

impl TilingState {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns the state for `monitor_id`, creating it on first observation.
    pub fn monitor_mut(&mut self, monitor_id: MonitorId) -> &mut MonitorTilingState {
        self.monitors
            .entry(monitor_id)
            .or_insert_with(|| MonitorTilingState::new(monitor_id))
    }

    #[must_use]
    pub fn monitor(&self, monitor_id: MonitorId) -> Option<&MonitorTilingState> {
        self.monitors.get(&monitor_id)
    }

    /// Finds the monitor whose containers hold `window_id`.
    #[must_use]
    pub fn monitor_of(&self, window_id: WindowId) -> Option<MonitorId> {
        self.monitors
            .values()
            .find(|state| state.contains_window(window_id))
            .map(MonitorTilingState::monitor_id)
    }

    /// Clears windows out of the states of monitors missing from `connected`.
    ///
    /// A window leaves a disconnected monitor's state once it is `placed` on a
    /// connected monitor or is no longer `present` at all. Layouts and
    /// containers stay, so the monitor comes back with its arrangement.
    pub fn release_disconnected(
        &mut self,
        connected: &[MonitorId],
        present: &HashSet<WindowId>,
        placed: &HashSet<WindowId>,
    ) {
        for state in self.monitors.values_mut().filter(|s| !connected.contains(&s.monitor_id())) {
            for id in state.window_ids() {
                if placed.contains(&id) || !present.contains(&id) {
                    state.remove_window(id);
                }
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.monitors.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.monitors.is_empty() }

    /// Drops every monitor state.
    pub fn reset(&mut self) { self.monitors.clear(); }
}
