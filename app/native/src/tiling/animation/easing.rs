//! Easing curves applied to raw animation progress.
//!
//! All curves map `[0, 1]` onto `[0, 1]` with fixed endpoints.

use crate::config::EasingType;

/// Linear interpolation between two values.
#[inline]
#[must_use]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 { (end - start).mul_add(t, start) }

/// Cubic ease-in: slow start.
#[inline]
#[must_use]
pub fn ease_in(t: f64) -> f64 { t.powi(3) }

/// Cubic ease-out: fast start, decelerating into the target.
#[inline]
#[must_use]
pub fn ease_out(t: f64) -> f64 { 1.0 - (1.0 - t).powi(3) }

/// Cubic ease-in-out.
#[inline]
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t.powi(3)
    } else {
        1.0 - (2.0f64.mul_add(-t, 2.0)).powi(3) / 2.0
    }
}

/// Applies the configured curve to clamped progress.
#[inline]
#[must_use]
pub fn apply_easing(t: f64, easing: EasingType) -> f64 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        EasingType::Linear => t,
        EasingType::EaseIn => ease_in(t),
        EasingType::EaseOut => ease_out(t),
        EasingType::EaseInOut => ease_in_out(t),
    }
}
