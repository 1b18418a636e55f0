//! Margin and padding handling for layouts.

use crate::config::TilingConfig;
use crate::tiling::state::Rect;

/// Resolved spacing values for layout calculations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gaps {
    /// Space between neighbouring containers.
    pub inner: f64,
    /// Space between the monitor's visible frame and the containers.
    pub outer: f64,
}

impl Gaps {
    /// Creates gaps with the given inner and outer values.
    #[must_use]
    pub const fn uniform(inner: f64, outer: f64) -> Self { Self { inner, outer } }

    /// Resolves gaps from the tiling configuration.
    #[must_use]
    pub const fn from_config(config: &TilingConfig) -> Self {
        Self::uniform(config.padding, config.margin)
    }

    /// Returns true if all gaps are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool { self.inner == 0.0 && self.outer == 0.0 }

    /// Applies the outer gap to a monitor frame, returning the container area.
    #[must_use]
    pub fn apply_outer(&self, frame: &Rect) -> Rect { frame.inset(self.outer) }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_gaps_is_zero() {
        assert!(Gaps::default().is_zero());
        assert!(!Gaps::uniform(10.0, 0.0).is_zero());
        assert!(!Gaps::uniform(0.0, 10.0).is_zero());
    }

    #[test]
    fn test_gaps_apply_outer() {
        let usable = Gaps::uniform(10.0, 20.0).apply_outer(&Rect::new(0.0, 0.0, 1920.0, 1080.0));

        assert_eq!(usable.x, 20.0);
        assert_eq!(usable.y, 20.0);
        assert_eq!(usable.width, 1880.0);
        assert_eq!(usable.height, 1040.0);
    }

    #[test]
    fn test_gaps_from_config() {
        let config = TilingConfig { margin: 8.0, padding: 4.0, ..TilingConfig::default() };
        assert_eq!(Gaps::from_config(&config), Gaps::uniform(4.0, 8.0));
    }
}
