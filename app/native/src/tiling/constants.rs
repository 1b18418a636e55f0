//! Internal constants for tiler tuning.
//!
//! Constants are grouped by functionality:
//! - `timing` - Debouncing and focus guard windows
//! - `layout` - Layout defaults and limits
//! - `animation` - Animation system parameters
//! - `repair` - Resize-rejection self-correction

/// Timing constants for event handling and debouncing.
pub mod timing {
    /// Default delay before a scheduled retile fires (ms).
    ///
    /// Every new event restarts the delay, so a burst of window events
    /// collapses into one pass.
    pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

    /// Default window after the tiler raises a window during which focus
    /// events are ignored (ms).
    ///
    /// Raising a window makes the window server report a focus change that
    /// would otherwise schedule another retile.
    pub const DEFAULT_FOCUS_GUARD_MS: u64 = 200;
}

/// Layout defaults and limits.
pub mod layout {
    /// Default outer margin between the visible frame and containers (pixels).
    pub const DEFAULT_MARGIN: f64 = 8.0;

    /// Default padding between neighbouring containers (pixels).
    pub const DEFAULT_PADDING: f64 = 8.0;

    /// Default accordion offset (pixels).
    pub const DEFAULT_ACCORDION_OFFSET: f64 = 32.0;

    /// Smallest accordion offset accepted from configuration (pixels).
    ///
    /// The layout engine itself uses whatever offset it is given.
    pub const MIN_ACCORDION_OFFSET: f64 = 4.0;
}

/// Animation system parameters.
pub mod animation {
    /// Default animation duration (ms).
    pub const DEFAULT_DURATION_MS: u64 = 200;

    /// Refresh rate assumed when none is configured (Hz).
    pub const DEFAULT_REFRESH_RATE: u32 = 60;
}

/// Resize-rejection repair.
pub mod repair {
    /// Maximum automatic re-tiles after new size rejections in one pass.
    pub const MAX_REJECTION_RETRIES: u32 = 3;
}
