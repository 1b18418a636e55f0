//! Frame animation engine.
//!
//! Batches of window moves share one clock and are interpolated together by
//! a single driver task that ticks at the display refresh rate. The driver
//! starts when the first batch is registered and exits once the table is
//! empty.
//!
//! Starting a batch cancels any in-flight batch touching one of its windows,
//! so the most recent request for a window always wins. Cancellation is
//! cooperative: flagged records resolve `Cancelled` on the driver's next
//! tick.
//!
//! Windows that refuse a size change are remembered in a rejection set that
//! the orchestrator consults to reclassify them as fixed.

pub mod easing;
pub mod state;
pub mod transition;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

pub use easing::{apply_easing, ease_in, ease_in_out, ease_out, lerp};
use parking_lot::Mutex;
pub use state::{AnimationId, AnimationRecord, AnimationTable, TargetList};
use tokio::sync::oneshot;
use tokio::time::{Instant, MissedTickBehavior};
pub use transition::AnimationTarget;

use crate::config::{AnimationsConfig, EasingType};
use crate::tiling::constants::animation::DEFAULT_REFRESH_RATE;
use crate::tiling::error::FrameError;
use crate::tiling::state::{Pid, Rect, WindowId};
use crate::tiling::window_ops::WindowOps;

/// How a batch ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnimationResult {
    /// Every window reached its end frame.
    Completed,
    /// A newer batch or an explicit cancel superseded this one.
    Cancelled,
    /// The batch could not be driven to completion.
    Failed(String),
}

/// Curve and tick rate used for newly registered batches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSettings {
    pub easing: EasingType,
    pub refresh_rate: u32,
}

impl Default for AnimationSettings {
    fn default() -> Self { Self { easing: EasingType::EaseOut, refresh_rate: DEFAULT_REFRESH_RATE } }
}

impl AnimationSettings {
    #[must_use]
    pub const fn from_config(config: &AnimationsConfig) -> Self {
        Self { easing: config.easing, refresh_rate: config.refresh_rate }
    }

    /// Interval between driver ticks.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.refresh_rate.max(1)))
    }
}

struct EngineInner {
    ops: Arc<dyn WindowOps>,
    table: Mutex<AnimationTable>,
    rejected: Mutex<HashSet<WindowId>>,
    settings: Mutex<AnimationSettings>,
}

/// Cloneable handle to the animation engine.
#[derive(Clone)]
pub struct AnimationEngine {
    inner: Arc<EngineInner>,
}

impl std::fmt::Debug for AnimationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationEngine")
            .field("in_flight", &self.in_flight())
            .field("settings", &*self.inner.settings.lock())
            .finish_non_exhaustive()
    }
}

impl AnimationEngine {
    #[must_use]
    pub fn new(ops: Arc<dyn WindowOps>, settings: AnimationSettings) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                ops,
                table: Mutex::new(AnimationTable::default()),
                rejected: Mutex::new(HashSet::new()),
                settings: Mutex::new(settings),
            }),
        }
    }

    /// Replaces the settings used by batches registered from now on.
    pub fn configure(&self, settings: AnimationSettings) { *self.inner.settings.lock() = settings; }

    #[must_use]
    pub fn settings(&self) -> AnimationSettings { *self.inner.settings.lock() }

    /// Number of batches currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize { self.inner.table.lock().len() }

    #[must_use]
    pub fn is_animating(&self) -> bool { self.inner.table.lock().driver_running }

    /// Animates every target from its start to its end frame.
    ///
    /// A zero duration writes end frames immediately, one call per window. A
    /// positive duration registers the batch with the shared driver and
    /// waits for it to resolve. Per-window write failures are logged and
    /// never fail the batch.
    pub async fn animate_batch(
        &self,
        targets: Vec<AnimationTarget>,
        duration: Duration,
    ) -> AnimationResult {
        if targets.is_empty() {
            return AnimationResult::Completed;
        }

        if duration.is_zero() {
            for target in &targets {
                self.inner.write_frame(target.window_id, target.owner_pid, target.end);
            }
            return AnimationResult::Completed;
        }

        let settings = self.settings();
        let (tx, rx) = oneshot::channel();
        let spawn_driver = {
            let mut table = self.inner.table.lock();
            for target in &targets {
                table.cancel_window(target.window_id);
            }
            let id = table.allocate_id();
            tracing::debug!(animation_id = id.0, windows = targets.len(), ?duration, "animation registered");
            table.insert(AnimationRecord::new(
                id,
                targets.into_iter().collect(),
                duration,
                settings.easing,
                tx,
            ));
            let idle = !table.driver_running;
            table.driver_running = true;
            idle
        };

        if spawn_driver {
            tokio::spawn(drive(Arc::clone(&self.inner), settings.frame_interval()));
        }

        rx.await
            .unwrap_or_else(|_| AnimationResult::Failed("animation driver stopped".to_string()))
    }

    /// Flags every in-flight batch touching `window_id` as cancelled.
    pub fn cancel_animation(&self, window_id: WindowId) {
        let count = self.inner.table.lock().cancel_window(window_id);
        if count > 0 {
            tracing::debug!(%window_id, count, "animation cancelled");
        }
    }

    /// Flags every in-flight batch as cancelled.
    pub fn cancel_all_animations(&self) {
        let count = self.inner.table.lock().cancel_all();
        if count > 0 {
            tracing::debug!(count, "all animations cancelled");
        }
    }

    /// Raises windows back to front in the given order. Returns how many
    /// windows were raised.
    pub fn raise_windows_in_order(&self, windows: &[(WindowId, Pid)]) -> usize {
        windows
            .iter()
            .filter(|&&(window_id, pid)| match self.inner.ops.raise_window(window_id, pid) {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(%window_id, %err, "failed to raise window");
                    false
                }
            })
            .count()
    }

    /// Windows that refused a size change since the last clear.
    #[must_use]
    pub fn rejected_windows(&self) -> HashSet<WindowId> { self.inner.rejected.lock().clone() }

    pub fn clear_rejections(&self) { self.inner.rejected.lock().clear(); }
}

impl EngineInner {
    fn write_frame(&self, window_id: WindowId, pid: Pid, frame: Rect) {
        match self.ops.set_frame(frame, window_id, pid) {
            Ok(()) => {}
            Err(FrameError::SizeRejected) => {
                if self.rejected.lock().insert(window_id) {
                    tracing::debug!(%window_id, "window rejected size change");
                }
            }
            Err(FrameError::PositionFailed(reason)) => {
                tracing::warn!(%window_id, %reason, "failed to position window");
            }
        }
    }
}

/// Driver loop: one coherent step for every in-flight batch per tick.
async fn drive(inner: Arc<EngineInner>, frame_interval: Duration) {
    let mut ticker = tokio::time::interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tracing::trace!(?frame_interval, "animation driver started");

    loop {
        ticker.tick().await;
        let output = inner.table.lock().tick(Instant::now());

        for write in &output.writes {
            inner.write_frame(write.target.window_id, write.target.owner_pid, write.frame);
        }
        for (mut record, result) in output.finished {
            tracing::debug!(animation_id = record.id.0, ?result, "animation finished");
            record.resolve(result);
        }

        if !output.keep_running {
            break;
        }
    }
    tracing::trace!("animation driver stopped");
}

// ============================================================================
// Tests
// ============================================================================
