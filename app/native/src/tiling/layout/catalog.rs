//! Built-in layout catalog.
//!
//! Each [`LayoutId`] carves a container area into a fixed set of container
//! frames and decides which way the accordions inside them stack.

use smallvec::SmallVec;

use super::gaps::Gaps;
use super::helpers::{split_even, split_vertical};
use crate::tiling::state::{LayoutId, Orientation, Rect};

/// Container frames for one layout. Never more than four.
pub type ContainerFrames = SmallVec<[Rect; 4]>;

/// Number of containers a layout produces.
#[must_use]
pub const fn container_count(layout: LayoutId) -> usize {
    match layout {
        LayoutId::Monocle => 1,
        LayoutId::Columns2 | LayoutId::Rows2 => 2,
        LayoutId::Columns3 => 3,
        LayoutId::Grid2x2 => 4,
    }
}

/// Accordion orientation of a layout's containers.
///
/// Columns stack sideways, rows stack vertically.
#[must_use]
pub const fn orientation(layout: LayoutId) -> Orientation {
    match layout {
        LayoutId::Rows2 => Orientation::Vertical,
        LayoutId::Monocle | LayoutId::Columns2 | LayoutId::Columns3 | LayoutId::Grid2x2 => {
            Orientation::Horizontal
        }
    }
}

/// Container frames for `layout` within a monitor's visible frame.
#[must_use]
pub fn container_frames(layout: LayoutId, visible_frame: &Rect, gaps: &Gaps) -> ContainerFrames {
    let area = gaps.apply_outer(visible_frame);
    let padding = gaps.inner;

    match layout {
        LayoutId::Monocle => SmallVec::from_elem(area, 1),
        LayoutId::Columns2 => split_even(&area, 2, padding, Orientation::Horizontal),
        LayoutId::Columns3 => split_even(&area, 3, padding, Orientation::Horizontal),
        LayoutId::Rows2 => split_even(&area, 2, padding, Orientation::Vertical),
        LayoutId::Grid2x2 => {
            let (top, bottom) = split_vertical(&area, 0.5, padding);
            let mut frames = split_even(&top, 2, padding, Orientation::Horizontal);
            frames.extend(split_even(&bottom, 2, padding, Orientation::Horizontal));
            frames
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    #[test]
    fn test_counts_match_frames() {
        let gaps = Gaps::uniform(8.0, 8.0);
        for layout in LayoutId::ALL {
            assert_eq!(container_frames(layout, &SCREEN, &gaps).len(), container_count(layout));
        }
    }

    #[test]
    fn test_monocle_is_margin_inset() {
        let frames = container_frames(LayoutId::Monocle, &SCREEN, &Gaps::uniform(0.0, 8.0));
        assert_eq!(frames[0], Rect::new(8.0, 8.0, 1904.0, 1064.0));
    }

    #[test]
    fn test_columns_are_padded() {
        let frames = container_frames(LayoutId::Columns2, &SCREEN, &Gaps::uniform(10.0, 0.0));
        assert_eq!(frames[0], Rect::new(0.0, 0.0, 955.0, 1080.0));
        assert_eq!(frames[1], Rect::new(965.0, 0.0, 955.0, 1080.0));
    }

    #[test]
    fn test_grid_order_is_row_major() {
        let frames = container_frames(LayoutId::Grid2x2, &SCREEN, &Gaps::default());
        assert_eq!(frames[0], Rect::new(0.0, 0.0, 960.0, 540.0));
        assert_eq!(frames[1], Rect::new(960.0, 0.0, 960.0, 540.0));
        assert_eq!(frames[2], Rect::new(0.0, 540.0, 960.0, 540.0));
        assert_eq!(frames[3], Rect::new(960.0, 540.0, 960.0, 540.0));
    }

    #[test]
    fn test_orientation() {
        assert_eq!(orientation(LayoutId::Rows2), Orientation::Vertical);
        assert_eq!(orientation(LayoutId::Columns3), Orientation::Horizontal);
    }
}
