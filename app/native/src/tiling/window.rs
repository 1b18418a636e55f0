//! Window snapshots and the window discovery contract.
//!
//! The tiler never talks to the accessibility layer directly. A
//! [`WindowSource`] hands it immutable [`WindowInfo`] snapshots and pushes
//! change events into a channel; the tiler only ever replaces its cached
//! copy of a snapshot.

use tokio::sync::mpsc;

use super::events::{SubscriptionId, WindowEvent};
use super::state::{Pid, Rect, WindowId};

// ============================================================================
// Snapshots
// ============================================================================

/// Snapshot of an on-screen application window.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowInfo {
    /// Window server id.
    pub id: WindowId,
    /// Window title.
    pub title: String,
    /// Owning application name.
    pub app_name: String,
    /// Bundle identifier of the owning app, when it has one.
    pub bundle_id: Option<String>,
    /// Current frame.
    pub frame: Rect,
    /// Whether the window accepts size changes.
    pub is_resizable: bool,
    /// Whether the window floats above the tiled layout.
    pub is_floating: bool,
    /// Owning process id.
    pub pid: Pid,
}

impl WindowInfo {
    /// Creates a resizable, non-floating window snapshot.
    #[must_use]
    pub fn new(id: WindowId, pid: Pid, app_name: impl Into<String>, frame: Rect) -> Self {
        Self {
            id,
            title: String::new(),
            app_name: app_name.into(),
            bundle_id: None,
            frame,
            is_resizable: true,
            is_floating: false,
            pid,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.bundle_id = Some(bundle_id.into());
        self
    }

    #[must_use]
    pub const fn with_resizable(mut self, is_resizable: bool) -> Self {
        self.is_resizable = is_resizable;
        self
    }

    #[must_use]
    pub const fn with_floating(mut self, is_floating: bool) -> Self {
        self.is_floating = is_floating;
        self
    }

    /// Resizable and not floating: takes part in the accordion.
    #[must_use]
    pub const fn is_tileable(&self) -> bool { self.is_resizable && !self.is_floating }

    /// Non-resizable and not floating: centered in its container.
    #[must_use]
    pub const fn is_fixed(&self) -> bool { !self.is_resizable && !self.is_floating }
}

/// The focused window as reported by the window system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusedWindowInfo {
    pub id: WindowId,
    pub pid: Pid,
}

// ============================================================================
// Discovery Contract
// ============================================================================

/// Supplies window snapshots and change notifications.
pub trait WindowSource: Send + Sync {
    /// All on-screen application windows, in discovery order.
    fn visible_windows(&self) -> Vec<WindowInfo>;

    /// The currently focused window, if any.
    fn focused_window(&self) -> Option<FocusedWindowInfo>;

    /// Starts delivering window events into `sender`.
    fn subscribe(&self, sender: mpsc::Sender<WindowEvent>) -> SubscriptionId;

    /// Stops delivering events for a subscription. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}
