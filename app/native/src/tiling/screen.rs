//! Monitor snapshots and the monitor discovery contract.

use tokio::sync::mpsc;

use super::events::{ScreenEvent, SubscriptionId};
use super::state::{MonitorId, Rect};

/// A connected display.
#[derive(Clone, Debug, PartialEq)]
pub struct MonitorInfo {
    pub id: MonitorId,
    /// Display name, e.g. "Built-in Retina Display".
    pub name: String,
    /// Full display frame.
    pub frame: Rect,
    /// Frame minus the menu bar and dock.
    pub visible_frame: Rect,
    pub is_main: bool,
    pub scale_factor: f64,
}

impl MonitorInfo {
    /// Creates a monitor whose visible frame equals its full frame.
    #[must_use]
    pub fn new(id: MonitorId, name: impl Into<String>, frame: Rect) -> Self {
        Self {
            id,
            name: name.into(),
            frame,
            visible_frame: frame,
            is_main: false,
            scale_factor: 1.0,
        }
    }

    #[must_use]
    pub const fn with_visible_frame(mut self, visible_frame: Rect) -> Self {
        self.visible_frame = visible_frame;
        self
    }

    #[must_use]
    pub const fn with_main(mut self, is_main: bool) -> Self {
        self.is_main = is_main;
        self
    }
}

/// Supplies the connected monitors and display-change notifications.
pub trait ScreenSource: Send + Sync {
    /// All connected monitors.
    fn connected_monitors(&self) -> Vec<MonitorInfo>;

    /// Starts delivering display events into `sender`.
    fn subscribe(&self, sender: mpsc::Sender<ScreenEvent>) -> SubscriptionId;

    /// Stops delivering events for a subscription. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Returns the main monitor, falling back to the first one.
#[must_use]
pub fn main_or_first(monitors: &[MonitorInfo]) -> Option<&MonitorInfo> {
    monitors.iter().find(|m| m.is_main).or_else(|| monitors.first())
}
