//! Change events delivered by the window and screen collaborators.
//!
//! Collaborators push events into a bounded `tokio::sync::mpsc` channel handed
//! to them at subscription time. Delivery order is channel order; each event
//! is delivered once.

use std::sync::atomic::{AtomicU64, Ordering};

use super::state::{Rect, WindowId};
use super::window::WindowInfo;

/// Capacity of the event channels the orchestrator hands to its collaborators.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Window lifecycle and geometry notifications.
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// A new window appeared.
    Opened(WindowInfo),
    /// A window was closed.
    Closed(WindowId),
    /// A window became the focused window.
    Focused(WindowId),
    /// A window moved. Not acted on by the tiler.
    Moved(WindowId, Rect),
    /// A window was resized. Not acted on by the tiler.
    Resized(WindowId, Rect),
}

impl WindowEvent {
    /// Whether the tiler schedules a retile for this event.
    ///
    /// Geometry changes are ignored so the tiler never fights moves it did
    /// not initiate.
    #[must_use]
    pub const fn triggers_retile(&self) -> bool {
        matches!(self, Self::Opened(_) | Self::Closed(_) | Self::Focused(_))
    }

    /// Short event name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Opened(_) => "opened",
            Self::Closed(_) => "closed",
            Self::Focused(_) => "focused",
            Self::Moved(..) => "moved",
            Self::Resized(..) => "resized",
        }
    }
}

/// Display configuration notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Monitors were connected, disconnected or rearranged.
    ConfigurationChanged,
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

impl SubscriptionId {
    /// Allocates a process-unique subscription id.
    #[must_use]
    pub fn next() -> Self { Self(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed)) }
}
