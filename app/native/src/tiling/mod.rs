//! Accordion tiling for Concertina.
//!
//! Each monitor is split into containers by its active layout; inside a
//! container windows share one size and are staggered so the neighbours of
//! the focused window peek out from behind it.
//!
//! # Architecture
//!
//! - [`state`]: containers and per-monitor tiling state
//! - [`layout`]: the pure layout engine and the layout catalog
//! - [`animation`]: the shared frame driver that moves windows
//! - [`manager`]: the orchestrator tying events, state and animation together
//!
//! The window system is reached only through the [`WindowSource`],
//! [`ScreenSource`] and [`WindowOps`] traits. [`VirtualDesktop`] implements
//! all three in memory.

pub mod animation;
pub mod constants;
pub mod debouncer;
pub mod error;
pub mod events;
pub mod layout;
pub mod manager;
pub mod rules;
pub mod screen;
pub mod state;
pub mod virtual_desktop;
pub mod window;
pub mod window_ops;

pub use animation::{AnimationEngine, AnimationResult, AnimationSettings, AnimationTarget};
pub use error::{FrameError, TilingError};
pub use events::{ScreenEvent, SubscriptionId, WindowEvent};
pub use manager::{TilingManager, TilingResult};
pub use screen::{MonitorInfo, ScreenSource};
pub use state::{
    Container, ContainerId, Direction, LayoutId, MonitorId, MonitorTilingState, Orientation, Pid,
    Rect, TilingState, WindowId,
};
pub use virtual_desktop::VirtualDesktop;
pub use window::{FocusedWindowInfo, WindowInfo, WindowSource};
pub use window_ops::WindowOps;
