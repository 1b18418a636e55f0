//! Tiling and animation configuration types.

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::rules::WindowRule;
use crate::tiling::constants::{animation, layout, timing};
use crate::tiling::state::LayoutId;

/// Easing function for animations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Linear interpolation.
    Linear,
    /// Ease in (slow start).
    EaseIn,
    /// Ease out (slow end).
    #[default]
    EaseOut,
    /// Ease in and out (slow start and end).
    EaseInOut,
}

/// Layout and window-handling settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TilingConfig {
    /// Space between the monitor's visible frame and the containers, in pixels.
    /// Default: 8
    pub margin: f64,

    /// Space between neighbouring containers, in pixels.
    /// Default: 8
    pub padding: f64,

    /// How far stacked windows peek out from behind the focused one, in pixels.
    /// Values below 4 are raised to 4.
    /// Default: 32
    pub accordion_offset: f64,

    /// Layout applied to monitors seen for the first time.
    /// Default: "monocle"
    pub default_layout: LayoutId,

    /// Windows that float above the layout instead of being tiled.
    pub floating: Vec<WindowRule>,

    /// Windows the tiler never touches.
    pub ignore: Vec<WindowRule>,

    /// Delay before a retile fires after window events, in milliseconds.
    /// Default: 50
    pub debounce_ms: u64,

    /// How long focus events are ignored after the tiler raises a window, in milliseconds.
    /// Default: 200
    pub focus_guard_ms: u64,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            margin: layout::DEFAULT_MARGIN,
            padding: layout::DEFAULT_PADDING,
            accordion_offset: layout::DEFAULT_ACCORDION_OFFSET,
            default_layout: LayoutId::default(),
            floating: Vec::new(),
            ignore: Vec::new(),
            debounce_ms: timing::DEFAULT_DEBOUNCE_MS,
            focus_guard_ms: timing::DEFAULT_FOCUS_GUARD_MS,
        }
    }
}

impl TilingConfig {
    /// Clamps the accordion offset and prepares every rule for matching.
    pub fn normalize(&mut self) {
        if self.accordion_offset.is_nan() || self.accordion_offset < layout::MIN_ACCORDION_OFFSET {
            tracing::debug!(
                configured = self.accordion_offset,
                minimum = layout::MIN_ACCORDION_OFFSET,
                "accordion offset raised to minimum"
            );
            self.accordion_offset = layout::MIN_ACCORDION_OFFSET;
        }
        self.margin = self.margin.max(0.0);
        self.padding = self.padding.max(0.0);
        self.floating.iter_mut().chain(self.ignore.iter_mut()).for_each(WindowRule::prepare);
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration { Duration::from_millis(self.debounce_ms) }

    #[must_use]
    pub const fn focus_guard(&self) -> Duration { Duration::from_millis(self.focus_guard_ms) }
}

/// Window transition settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationsConfig {
    /// Whether window moves are animated.
    /// Default: true
    pub enabled: bool,

    /// Animation duration in milliseconds.
    /// Default: 200
    pub duration: u64,

    /// Easing function.
    /// Default: "ease-out"
    pub easing: EasingType,

    /// Whether the first tile after startup is animated.
    /// Default: false
    pub animate_initial_tile: bool,

    /// Ticks per second of the animation driver.
    /// Default: 60
    pub refresh_rate: u32,
}

impl Default for AnimationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: animation::DEFAULT_DURATION_MS,
            easing: EasingType::default(),
            animate_initial_tile: false,
            refresh_rate: animation::DEFAULT_REFRESH_RATE,
        }
    }
}

impl AnimationsConfig {
    /// Duration of a pass, zero when animations are disabled or when this is
    /// the initial tile and initial animation is off.
    #[must_use]
    pub const fn duration_for(&self, is_initial_tile: bool) -> Duration {
        if !self.enabled || (is_initial_tile && !self.animate_initial_tile) {
            Duration::ZERO
        } else {
            Duration::from_millis(self.duration)
        }
    }
}
