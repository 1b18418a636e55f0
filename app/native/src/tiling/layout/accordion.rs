//! Accordion geometry.
//!
//! Windows in a container share one size and are offset along the primary
//! axis so the edges of the neighbours peek out from behind the focused
//! window:
//!
//! - 1 window fills the container
//! - 2 windows: both are `offset` shorter; the focused one sits at the
//!   leading edge, the other `offset` further along
//! - 3 or more: all are `2 * offset` shorter; previous at the leading edge,
//!   focused at `offset`, next at `2 * offset`, everything else hidden in
//!   the focused slot
//!
//! The cross axis always fills the container. The offset is used as given.

use smallvec::SmallVec;

use crate::tiling::state::{Orientation, Rect};

/// Frames for `count` ring members, indexed like the ring.
pub type AccordionFrames = SmallVec<[Rect; 16]>;

/// Computes the frame of every ring member around `focus`.
///
/// `focus` values outside the ring are treated as 0.
#[must_use]
pub fn accordion_frames(
    count: usize,
    focus: usize,
    container: &Rect,
    offset: f64,
    orientation: Orientation,
) -> AccordionFrames {
    if count == 0 {
        return SmallVec::new();
    }
    let focus = if focus < count { focus } else { 0 };

    match count {
        1 => SmallVec::from_elem(*container, 1),
        2 => (0..count)
            .map(|index| {
                let shift = if index == focus { 0.0 } else { offset };
                slot(container, shift, offset, orientation)
            })
            .collect(),
        _ => {
            let prev = (focus + count - 1) % count;
            let next = (focus + 1) % count;
            let shrink = 2.0 * offset;
            (0..count)
                .map(|index| {
                    let shift = if index == prev {
                        0.0
                    } else if index == next {
                        2.0 * offset
                    } else {
                        offset
                    };
                    slot(container, shift, shrink, orientation)
                })
                .collect()
        }
    }
}

/// A frame shifted by `shift` and shortened by `shrink` on the primary axis.
fn slot(container: &Rect, shift: f64, shrink: f64, orientation: Orientation) -> Rect {
    match orientation {
        Orientation::Horizontal => Rect::new(
            container.min_x() + shift,
            container.min_y(),
            container.width - shrink,
            container.height,
        ),
        Orientation::Vertical => Rect::new(
            container.min_x(),
            container.min_y() + shift,
            container.width,
            container.height - shrink,
        ),
    }
}

/// Centers a fixed-size window in the container, or `None` when it does
/// not fit on both axes.
#[must_use]
pub fn center_fixed(container: &Rect, size: &Rect) -> Option<Rect> {
    if size.width > container.width || size.height > container.height {
        return None;
    }
    Some(Rect::new(
        container.min_x() + (container.width - size.width) / 2.0,
        container.min_y() + (container.height - size.height) / 2.0,
        size.width,
        size.height,
    ))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const CONTAINER: Rect = Rect::new(8.0, 8.0, 1904.0, 1064.0);

    #[test]
    fn test_single_window_fills_container() {
        let frames = accordion_frames(1, 0, &CONTAINER, 32.0, Orientation::Horizontal);
        assert_eq!(frames.as_slice(), &[CONTAINER]);
    }

    #[test]
    fn test_two_windows_focused_leads() {
        let frames = accordion_frames(2, 1, &CONTAINER, 32.0, Orientation::Horizontal);

        assert_eq!(frames[1], Rect::new(8.0, 8.0, 1872.0, 1064.0));
        assert_eq!(frames[0], Rect::new(40.0, 8.0, 1872.0, 1064.0));
    }

    #[test]
    fn test_three_or_more_windows_use_three_slots() {
        for count in 3..=7 {
            for focus in 0..count {
                let frames = accordion_frames(count, focus, &CONTAINER, 32.0, Orientation::Horizontal);
                let prev = (focus + count - 1) % count;
                let next = (focus + 1) % count;

                for (index, frame) in frames.iter().enumerate() {
                    assert_eq!(frame.width, 1840.0);
                    assert_eq!(frame.height, 1064.0);
                    let expected_x = if index == prev {
                        8.0
                    } else if index == next {
                        72.0
                    } else {
                        40.0
                    };
                    assert_eq!(frame.x, expected_x, "count {count} focus {focus} index {index}");
                }
            }
        }
    }

    #[test]
    fn test_vertical_mirrors_on_y() {
        let frames = accordion_frames(3, 0, &CONTAINER, 20.0, Orientation::Vertical);

        assert_eq!(frames[2], Rect::new(8.0, 8.0, 1904.0, 1024.0));
        assert_eq!(frames[0], Rect::new(8.0, 28.0, 1904.0, 1024.0));
        assert_eq!(frames[1], Rect::new(8.0, 48.0, 1904.0, 1024.0));
    }

    #[test]
    fn test_out_of_range_focus_falls_back_to_first() {
        let frames = accordion_frames(2, 9, &CONTAINER, 32.0, Orientation::Horizontal);
        assert_eq!(frames[0].x, 8.0);
    }

    #[test]
    fn test_center_fixed() {
        let centered = center_fixed(&CONTAINER, &Rect::new(0.0, 0.0, 400.0, 300.0)).unwrap();
        assert_eq!(centered, Rect::new(760.0, 390.0, 400.0, 300.0));

        assert!(center_fixed(&CONTAINER, &Rect::new(0.0, 0.0, 2000.0, 300.0)).is_none());
        assert!(center_fixed(&CONTAINER, &Rect::new(0.0, 0.0, 400.0, 1100.0)).is_none());
    }
}
