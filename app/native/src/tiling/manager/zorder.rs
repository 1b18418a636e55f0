//! Raise ordering for the accordion.
//!
//! The focused window is never raised: it is already frontmost from the
//! user's own interaction, and raising it again would produce a focus event.

use smallvec::SmallVec;

use crate::tiling::state::WindowId;

/// Windows to raise, back to front.
pub type RaiseList = SmallVec<[WindowId; 16]>;

/// Raise order for a container's tileable ring with `focused` in front.
///
/// Every window other than the ring neighbours goes first, in ring order,
/// then the previous window, then the next one. Rings of fewer than two
/// windows, or rings that do not hold `focused`, need no raising.
#[must_use]
pub fn raise_sequence(ring: &[WindowId], focused: WindowId) -> RaiseList {
    let len = ring.len();
    let Some(f) = ring.iter().position(|&id| id == focused) else {
        return RaiseList::new();
    };
    if len < 2 {
        return RaiseList::new();
    }

    let prev = ring[(f + len - 1) % len];
    let next = ring[(f + 1) % len];

    let mut sequence: RaiseList =
        ring.iter().copied().filter(|&id| id != focused && id != prev && id != next).collect();
    sequence.push(prev);
    if next != prev {
        sequence.push(next);
    }
    sequence
}
