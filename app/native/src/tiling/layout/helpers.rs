//! Helper functions for carving a frame into container regions.

use smallvec::SmallVec;

use crate::tiling::state::{Orientation, Rect};

/// Splits a frame vertically (top/bottom) at the given ratio with a gap.
#[must_use]
pub fn split_vertical(frame: &Rect, ratio: f64, gap: f64) -> (Rect, Rect) {
    let available_height = frame.height - gap;
    let top_height = available_height * ratio;
    let bottom_height = available_height - top_height;

    let top = Rect::new(frame.x, frame.y, frame.width, top_height);
    let bottom = Rect::new(frame.x, frame.y + top_height + gap, frame.width, bottom_height);

    (top, bottom)
}

/// Divides a frame into `count` equal parts along an axis, `gap` apart.
///
/// Horizontal produces side-by-side columns, vertical stacked rows.
#[must_use]
pub fn split_even(
    frame: &Rect,
    count: usize,
    gap: f64,
    orientation: Orientation,
) -> SmallVec<[Rect; 4]> {
    if count == 0 {
        return SmallVec::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let parts = count as f64;
    let total_gap = gap * (parts - 1.0);

    (0..count)
        .map(|index| {
            #[allow(clippy::cast_precision_loss)]
            let step = index as f64;
            match orientation {
                Orientation::Horizontal => {
                    let width = (frame.width - total_gap) / parts;
                    Rect::new(step.mul_add(width + gap, frame.x), frame.y, width, frame.height)
                }
                Orientation::Vertical => {
                    let height = (frame.height - total_gap) / parts;
                    Rect::new(frame.x, step.mul_add(height + gap, frame.y), frame.width, height)
                }
            }
        })
        .collect()
}
