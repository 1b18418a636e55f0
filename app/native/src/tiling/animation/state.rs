//! In-flight animation records.
//!
//! The table is the only state shared between the driver task and callers
//! scheduling or cancelling animations. It lives behind one mutex that is
//! never held across a window write.

use std::time::Duration;

use smallvec::SmallVec;
use tokio::sync::oneshot;
use tokio::time::Instant;

use super::AnimationResult;
use super::easing::apply_easing;
use super::transition::AnimationTarget;
use crate::config::EasingType;
use crate::tiling::state::{Rect, WindowId};

/// Targets of one batch. Inline for the common case.
pub type TargetList = SmallVec<[AnimationTarget; 16]>;

/// Identifier of a registered batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId(pub u64);

/// One batch of window animations sharing a clock.
#[derive(Debug)]
pub struct AnimationRecord {
    pub id: AnimationId,
    pub targets: TargetList,
    pub start_time: Instant,
    pub duration: Duration,
    pub easing: EasingType,
    /// Raw progress observed on the last tick.
    pub progress: f64,
    pub cancelled: bool,
    respond_to: Option<oneshot::Sender<AnimationResult>>,
}

impl AnimationRecord {
    pub fn new(
        id: AnimationId,
        targets: TargetList,
        duration: Duration,
        easing: EasingType,
        respond_to: oneshot::Sender<AnimationResult>,
    ) -> Self {
        Self {
            id,
            targets,
            start_time: Instant::now(),
            duration,
            easing,
            progress: 0.0,
            cancelled: false,
            respond_to: Some(respond_to),
        }
    }

    #[must_use]
    pub fn touches(&self, window_id: WindowId) -> bool {
        self.targets.iter().any(|t| t.window_id == window_id)
    }

    /// Raw progress at `now`, clamped to `[0, 1]`.
    #[must_use]
    pub fn raw_progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Resolves the awaiting caller. Later calls do nothing.
    pub fn resolve(&mut self, result: AnimationResult) {
        if let Some(sender) = self.respond_to.take() {
            // The caller may have stopped waiting.
            let _ = sender.send(result);
        }
    }
}

/// A window write produced by one tick.
#[derive(Clone, Copy, Debug)]
pub struct FrameWrite {
    pub target: AnimationTarget,
    pub frame: Rect,
}

/// Outcome of advancing the table by one tick.
#[derive(Debug, Default)]
pub struct TickOutput {
    /// Frames to write, outside the lock.
    pub writes: Vec<FrameWrite>,
    /// Records that finished on this tick, to resolve after the writes.
    pub finished: Vec<(AnimationRecord, AnimationResult)>,
    /// Whether any record is still in flight.
    pub keep_running: bool,
}

/// All in-flight animations.
#[derive(Debug, Default)]
pub struct AnimationTable {
    records: Vec<AnimationRecord>,
    next_id: u64,
    /// Whether a driver task is currently ticking this table.
    pub driver_running: bool,
}

impl AnimationTable {
    pub fn allocate_id(&mut self) -> AnimationId {
        self.next_id += 1;
        AnimationId(self.next_id)
    }

    pub fn insert(&mut self, record: AnimationRecord) { self.records.push(record); }

    #[must_use]
    pub fn len(&self) -> usize { self.records.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Flags every live record touching `window_id`. Returns how many were flagged.
    pub fn cancel_window(&mut self, window_id: WindowId) -> usize {
        let mut count = 0;
        for record in self.records.iter_mut().filter(|r| !r.cancelled && r.touches(window_id)) {
            record.cancelled = true;
            count += 1;
        }
        count
    }

    /// Flags every live record.
    pub fn cancel_all(&mut self) -> usize {
        let mut count = 0;
        for record in self.records.iter_mut().filter(|r| !r.cancelled) {
            record.cancelled = true;
            count += 1;
        }
        count
    }

    /// Advances every record to `now`.
    ///
    /// Cancelled records resolve `Cancelled` without writing. Records whose
    /// raw progress reached 1.0 produce their final frames and resolve
    /// `Completed`. When the table drains, `driver_running` is cleared.
    pub fn tick(&mut self, now: Instant) -> TickOutput {
        let mut output = TickOutput::default();
        let mut live = Vec::with_capacity(self.records.len());

        for mut record in self.records.drain(..) {
            if record.cancelled {
                output.finished.push((record, AnimationResult::Cancelled));
                continue;
            }

            let raw = record.raw_progress(now);
            record.progress = raw;
            let eased = apply_easing(raw, record.easing);
            output.writes.extend(record.targets.iter().map(|&target| FrameWrite {
                target,
                frame: target.frame_at(eased),
            }));

            if raw >= 1.0 {
                output.finished.push((record, AnimationResult::Completed));
            } else {
                live.push(record);
            }
        }

        self.records = live;
        output.keep_running = !self.records.is_empty();
        if !output.keep_running {
            self.driver_running = false;
        }
        output
    }
}
