//! In-memory window system.
//!
//! [`VirtualDesktop`] implements [`WindowSource`], [`ScreenSource`] and
//! [`WindowOps`] over plain data so the tiler can run without a window
//! server: the `simulate` command, integration tests and benches drive it.
//!
//! It behaves like the real thing where the tiler cares: focusing a window
//! raises it and reports a focus event, windows marked with
//! [`VirtualDesktop::reject_resize`] keep their size but still move, and
//! events are delivered to every subscriber without blocking.

use std::collections::HashSet;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::error::FrameError;
use super::events::{ScreenEvent, SubscriptionId, WindowEvent};
use super::screen::{MonitorInfo, ScreenSource};
use super::state::{MonitorId, Pid, Rect, WindowId};
use super::window::{FocusedWindowInfo, WindowInfo, WindowSource};
use super::window_ops::WindowOps;

#[derive(Debug, Default)]
struct Desktop {
    /// Windows in discovery order.
    windows: Vec<WindowInfo>,
    monitors: Vec<MonitorInfo>,
    focused: Option<WindowId>,
    /// Back to front.
    z_order: Vec<WindowId>,
    rejects_resize: HashSet<WindowId>,
    window_subscribers: Vec<(SubscriptionId, mpsc::Sender<WindowEvent>)>,
    screen_subscribers: Vec<(SubscriptionId, mpsc::Sender<ScreenEvent>)>,
    frame_writes: usize,
    raised: Vec<WindowId>,
}

impl Desktop {
    fn window_mut(&mut self, id: WindowId) -> Option<&mut WindowInfo> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    fn bring_to_front(&mut self, id: WindowId) {
        self.z_order.retain(|&w| w != id);
        self.z_order.push(id);
    }

    fn emit_window(&self, event: &WindowEvent) {
        for (id, sender) in &self.window_subscribers {
            if sender.try_send(event.clone()).is_err() {
                tracing::trace!(subscription = id.0, event = event.name(), "window event dropped");
            }
        }
    }

    fn emit_screen(&self, event: ScreenEvent) {
        for (_, sender) in &self.screen_subscribers {
            let _ = sender.try_send(event);
        }
    }
}

/// An in-memory desktop.
#[derive(Debug, Default)]
pub struct VirtualDesktop {
    inner: Mutex<Desktop>,
}

impl VirtualDesktop {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// A desktop with one main monitor of the given size at the origin.
    #[must_use]
    pub fn with_single_monitor(width: f64, height: f64) -> Self {
        let desktop = Self::new();
        desktop.add_monitor(
            MonitorInfo::new(MonitorId(1), "Built-in Display", Rect::new(0.0, 0.0, width, height))
                .with_main(true),
        );
        desktop
    }

    // ========================================================================
    // Monitors
    // ========================================================================

    pub fn add_monitor(&self, monitor: MonitorInfo) {
        let mut desktop = self.inner.lock();
        desktop.monitors.retain(|m| m.id != monitor.id);
        desktop.monitors.push(monitor);
        desktop.emit_screen(ScreenEvent::ConfigurationChanged);
    }

    pub fn remove_monitor(&self, id: MonitorId) -> bool {
        let mut desktop = self.inner.lock();
        let before = desktop.monitors.len();
        desktop.monitors.retain(|m| m.id != id);
        let removed = desktop.monitors.len() != before;
        if removed {
            desktop.emit_screen(ScreenEvent::ConfigurationChanged);
        }
        removed
    }

    // ========================================================================
    // Windows
    // ========================================================================

    /// Opens a window on top of the stack. Focus is unchanged.
    pub fn open_window(&self, window: WindowInfo) {
        let mut desktop = self.inner.lock();
        let id = window.id;
        desktop.windows.retain(|w| w.id != id);
        desktop.windows.push(window.clone());
        desktop.bring_to_front(id);
        desktop.emit_window(&WindowEvent::Opened(window));
    }

    /// Closes a window. If it was focused, the topmost remaining window
    /// takes focus.
    pub fn close_window(&self, id: WindowId) -> bool {
        let mut desktop = self.inner.lock();
        let before = desktop.windows.len();
        desktop.windows.retain(|w| w.id != id);
        if desktop.windows.len() == before {
            return false;
        }
        desktop.z_order.retain(|&w| w != id);
        desktop.rejects_resize.remove(&id);
        if desktop.focused == Some(id) {
            desktop.focused = desktop.z_order.last().copied();
        }
        desktop.emit_window(&WindowEvent::Closed(id));
        true
    }

    /// Focuses a window as the user would, bringing it to the front.
    pub fn activate(&self, id: WindowId) -> bool {
        let mut desktop = self.inner.lock();
        if !desktop.windows.iter().any(|w| w.id == id) {
            return false;
        }
        desktop.focused = Some(id);
        desktop.bring_to_front(id);
        desktop.emit_window(&WindowEvent::Focused(id));
        true
    }

    /// Makes a window refuse size changes from now on.
    pub fn reject_resize(&self, id: WindowId) { self.inner.lock().rejects_resize.insert(id); }

    #[must_use]
    pub fn window(&self, id: WindowId) -> Option<WindowInfo> {
        self.inner.lock().windows.iter().find(|w| w.id == id).cloned()
    }

    #[must_use]
    pub fn frame_of(&self, id: WindowId) -> Option<Rect> { self.window(id).map(|w| w.frame) }

    /// Window ids back to front.
    #[must_use]
    pub fn z_order(&self) -> Vec<WindowId> { self.inner.lock().z_order.clone() }

    /// Every window raised through [`WindowOps::raise_window`], in order.
    #[must_use]
    pub fn raised(&self) -> Vec<WindowId> { self.inner.lock().raised.clone() }

    /// Number of frame writes received.
    #[must_use]
    pub fn frame_writes(&self) -> usize { self.inner.lock().frame_writes }

    /// Clears the raise log and write counter.
    pub fn clear_log(&self) {
        let mut desktop = self.inner.lock();
        desktop.raised.clear();
        desktop.frame_writes = 0;
    }
}

// ============================================================================
// Collaborator Contracts
// ============================================================================

impl WindowSource for VirtualDesktop {
    fn visible_windows(&self) -> Vec<WindowInfo> { self.inner.lock().windows.clone() }

    fn focused_window(&self) -> Option<FocusedWindowInfo> {
        let desktop = self.inner.lock();
        let id = desktop.focused?;
        desktop
            .windows
            .iter()
            .find(|w| w.id == id)
            .map(|w| FocusedWindowInfo { id, pid: w.pid })
    }

    fn subscribe(&self, sender: mpsc::Sender<WindowEvent>) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.inner.lock().window_subscribers.push((id, sender));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.lock().window_subscribers.retain(|(sub, _)| *sub != id);
    }
}

impl ScreenSource for VirtualDesktop {
    fn connected_monitors(&self) -> Vec<MonitorInfo> { self.inner.lock().monitors.clone() }

    fn subscribe(&self, sender: mpsc::Sender<ScreenEvent>) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.inner.lock().screen_subscribers.push((id, sender));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.lock().screen_subscribers.retain(|(sub, _)| *sub != id);
    }
}

impl WindowOps for VirtualDesktop {
    fn set_frame(&self, frame: Rect, window_id: WindowId, _pid: Pid) -> Result<(), FrameError> {
        let mut desktop = self.inner.lock();
        desktop.frame_writes += 1;
        let rejects = desktop.rejects_resize.contains(&window_id);
        let window = desktop
            .window_mut(window_id)
            .ok_or_else(|| FrameError::PositionFailed(format!("no window {window_id}")))?;

        window.frame.x = frame.x;
        window.frame.y = frame.y;
        if rejects && !window.frame.same_size(&frame) {
            return Err(FrameError::SizeRejected);
        }
        window.frame.width = frame.width;
        window.frame.height = frame.height;
        Ok(())
    }

    fn raise_window(&self, window_id: WindowId, _pid: Pid) -> Result<(), FrameError> {
        let mut desktop = self.inner.lock();
        if !desktop.windows.iter().any(|w| w.id == window_id) {
            return Err(FrameError::PositionFailed(format!("no window {window_id}")));
        }
        desktop.raised.push(window_id);
        desktop.bring_to_front(window_id);
        Ok(())
    }

    fn focus_window(&self, window_id: WindowId, _pid: Pid) -> Result<(), FrameError> {
        if self.activate(window_id) {
            Ok(())
        } else {
            Err(FrameError::PositionFailed(format!("no window {window_id}")))
        }
    }
}
