//! Error types for the tiler.
//!
//! Per-window failures never abort a batch: they are logged and the pass
//! continues. Only the absence of monitors fails a whole pass, and only that
//! pass.

use thiserror::Error;

use super::state::WindowId;
use crate::config::ConfigError;

/// Errors raised by tiling operations.
#[derive(Debug, Error)]
pub enum TilingError {
    /// The window is not known to the window source or to any container.
    #[error("window {0} not found")]
    WindowNotFound(WindowId),

    /// A window could not be positioned.
    #[error("failed to position window: {0}")]
    PositionSetFailed(String),

    /// The window refused a size change. Recovered by reclassifying the
    /// window as fixed, never surfaced to the user.
    #[error("window {0} rejected a size change")]
    SizeSetRejected(WindowId),

    /// No monitors are connected. Fatal for the current pass only.
    #[error("no monitors detected")]
    NoMonitorsDetected,

    /// The animation was superseded before completing.
    #[error("animation cancelled")]
    AnimationCancelled,

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures reported by [`WindowOps`](super::window_ops::WindowOps).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The window accepted the position but refused the size.
    #[error("size rejected")]
    SizeRejected,

    /// The window could not be moved at all.
    #[error("position failed: {0}")]
    PositionFailed(String),
}

impl FrameError {
    /// Converts a frame failure for `window_id` into a tiling error.
    #[must_use]
    pub fn into_tiling_error(self, window_id: WindowId) -> TilingError {
        match self {
            Self::SizeRejected => TilingError::SizeSetRejected(window_id),
            Self::PositionFailed(reason) => TilingError::PositionSetFailed(reason),
        }
    }
}
