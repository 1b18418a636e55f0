//! Leader actions applied to the tiling state.

use std::collections::HashMap;

use tokio::sync::mpsc;

use super::{TilingManager, monitor_index_for};
use crate::hotkey::KeyAction;
use crate::tiling::layout::{self, Gaps};
use crate::tiling::screen::{MonitorInfo, main_or_first};
use crate::tiling::state::{Direction, LayoutId, MonitorId, Rect, WindowId};
use crate::tiling::window::WindowInfo;

impl TilingManager {
    /// Applies a leader action. Returns whether anything changed.
    ///
    /// Every handled action ends in a debounced retile so the new state
    /// reaches the screen.
    pub fn handle_action(&self, action: KeyAction) -> bool {
        tracing::debug!(%action, "leader action");
        let handled = match action {
            KeyAction::ExitLeader => return false,
            KeyAction::Retile => true,
            KeyAction::SwitchLayout(layout) => self.switch_layout(layout),
            KeyAction::FocusContainer(direction) => self.focus_container(direction),
            KeyAction::CycleWindow(direction) => self.cycle_window(direction),
            KeyAction::MoveWindow(direction) => self.move_window(direction),
        };

        if handled {
            self.schedule_retile();
        }
        handled
    }

    /// Applies actions until the sender goes away.
    pub async fn run_actions(&self, mut actions: mpsc::Receiver<KeyAction>) {
        while let Some(action) = actions.recv().await {
            self.handle_action(action);
        }
        tracing::debug!("action channel closed");
    }

    fn switch_layout(&self, layout_id: LayoutId) -> bool {
        let windows = self.inner.windows.visible_windows();
        let monitors = self.inner.screens.connected_monitors();
        let focused = self.focused_on_screen(&windows);
        let Some(monitor) = self.focused_monitor(focused, &monitors) else {
            return false;
        };

        let config = self.inner.config.snapshot();
        let frames =
            layout::container_frames(layout_id, &monitor.visible_frame, &Gaps::from_config(&config.tiling));
        let window_frames: HashMap<WindowId, Rect> = windows.iter().map(|w| (w.id, w.frame)).collect();

        let mut state = self.inner.state.lock();
        let monitor_state = state.monitor_mut(monitor.id);
        if monitor_state.active_layout() == Some(layout_id) {
            return false;
        }
        monitor_state.switch_layout(layout_id, &frames, Some(&window_frames));
        tracing::info!(monitor = %monitor.name, layout = layout_id.as_str(), "layout switched");
        true
    }

    fn focus_container(&self, direction: Direction) -> bool {
        let windows = self.inner.windows.visible_windows();
        let monitors = self.inner.screens.connected_monitors();
        let focused = self.focused_on_screen(&windows);
        let Some(monitor) = self.focused_monitor(focused, &monitors) else {
            return false;
        };

        let target = {
            let mut state = self.inner.state.lock();
            let monitor_state = state.monitor_mut(monitor.id);
            let Some(container_id) = monitor_state.set_focused_container(direction) else {
                return false;
            };
            monitor_state.container(container_id).and_then(|c| c.focused_window_id())
        };

        if let Some(window_id) = target {
            self.focus(window_id, &windows);
        }
        true
    }

    fn cycle_window(&self, direction: Direction) -> bool {
        let windows = self.inner.windows.visible_windows();
        let monitors = self.inner.screens.connected_monitors();
        let focused = self.focused_on_screen(&windows);
        let Some(monitor) = self.focused_monitor(focused, &monitors) else {
            return false;
        };

        let target = {
            let mut state = self.inner.state.lock();
            let monitor_state = state.monitor_mut(monitor.id);
            let anchor = focused.map(|w| w.id).filter(|&id| monitor_state.contains_window(id));
            monitor_state.cycle_window(direction, anchor)
        };

        match target {
            Some(window_id) if Some(window_id) != focused.map(|w| w.id) => {
                self.focus(window_id, &windows);
                true
            }
            _ => false,
        }
    }

    fn move_window(&self, direction: Direction) -> bool {
        let windows = self.inner.windows.visible_windows();
        let monitors = self.inner.screens.connected_monitors();
        let Some(focused) = self.focused_on_screen(&windows) else {
            return false;
        };
        let Some(monitor) = self.focused_monitor(Some(focused), &monitors) else {
            return false;
        };

        let moved = self.inner.state.lock().monitor_mut(monitor.id).move_window(focused.id, direction);
        if let Some(container) = moved {
            tracing::debug!(window_id = %focused.id, %container, %direction, "window moved");
        }
        moved.is_some()
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn focused_on_screen<'a>(&self, windows: &'a [WindowInfo]) -> Option<&'a WindowInfo> {
        let focused = self.inner.windows.focused_window()?;
        windows.iter().find(|w| w.id == focused.id)
    }

    /// The monitor holding the focused window, else the main monitor.
    fn focused_monitor<'a>(
        &self,
        focused: Option<&WindowInfo>,
        monitors: &'a [MonitorInfo],
    ) -> Option<&'a MonitorInfo> {
        let tracked: Option<MonitorId> =
            focused.and_then(|w| self.inner.state.lock().monitor_of(w.id));
        tracked
            .and_then(|id| monitors.iter().find(|m| m.id == id))
            .or_else(|| focused.and_then(|w| monitor_index_for(w, monitors)).map(|i| &monitors[i]))
            .or_else(|| main_or_first(monitors))
    }

    /// Gives keyboard focus to a window. The echo of the resulting focus
    /// event falls inside the focus guard.
    fn focus(&self, window_id: WindowId, windows: &[WindowInfo]) {
        let Some(window) = windows.iter().find(|w| w.id == window_id) else {
            return;
        };

        {
            let mut tracking = self.inner.tracking.lock();
            tracking.last_raise = Some(tokio::time::Instant::now());
            if window.is_tileable() {
                tracking.last_focused_tileable = Some(window_id);
            }
        }

        if let Err(err) = self.inner.ops.focus_window(window_id, window.pid) {
            tracing::warn!(%window_id, error = %err, "failed to focus window");
        }
    }
}
