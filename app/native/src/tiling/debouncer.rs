//! Single-slot debouncer for retile scheduling.
//!
//! At most one timer is pending at a time. Scheduling again aborts the
//! pending timer and starts a fresh one, so a burst of events pays for one
//! run of the latest state. Once a timer fires its work runs on its own task
//! and is no longer affected by later scheduling.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

#[derive(Debug)]
struct PendingTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    pending: Option<PendingTimer>,
}

/// Collapses bursts of requests into one delayed run.
#[derive(Debug)]
pub struct Debouncer {
    delay: Mutex<Duration>,
    slot: Arc<Mutex<Slot>>,
}

impl Debouncer {
    /// Creates a debouncer with the given settle delay.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay: Mutex::new(delay),
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration { *self.delay.lock() }

    /// Changes the delay used by subsequent schedules.
    pub fn set_delay(&self, delay: Duration) { *self.delay.lock() = delay; }

    /// Schedules `task` to run after the delay, replacing any pending timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay();
        let mut slot = self.slot.lock();
        if let Some(previous) = slot.pending.take() {
            previous.handle.abort();
        }
        slot.generation += 1;
        let generation = slot.generation;

        let shared = Arc::clone(&self.slot);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut slot = shared.lock();
                if slot.pending.as_ref().is_none_or(|p| p.generation != generation) {
                    return;
                }
                slot.pending = None;
            }
            tokio::spawn(task());
        });

        slot.pending = Some(PendingTimer { generation, handle });
    }

    /// Cancels the pending timer. Returns true when one was pending.
    pub fn cancel(&self) -> bool {
        let mut slot = self.slot.lock();
        slot.pending.take().is_some_and(|pending| {
            pending.handle.abort();
            true
        })
    }

    /// Whether a timer is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool { self.slot.lock().pending.is_some() }
}
