//! Leader-key state machine.
//!
//! The machine sees every raw key event. While idle it only watches for the
//! trigger chord; once leader mode is active it consumes every key-down so
//! nothing leaks to the foreground application, resolves bound chords to
//! [`KeyAction`]s and sends them down a channel.
//!
//! The optional timeout is a tokio task. Every key press in leader mode
//! aborts it and arms a new one; a generation counter makes a timer that
//! fires after being replaced do nothing. The timer goes through the same
//! locked transition as a real key press.

use std::sync::{Arc, Weak};
use std::time::Duration;

use eyeball::{Observable, Subscriber};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

use super::action::KeyAction;
use super::keymap::{KeyChord, KeyCode, Keymap, Modifiers};

/// Capacity of the action channel handed to [`LeaderKeyMachine::new`].
pub const ACTION_CHANNEL_CAPACITY: usize = 64;

/// Whether key events are being intercepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LeaderState {
    #[default]
    Idle,
    LeaderActive,
    /// One level of sub-grouping under the leader layer, keyed by the key
    /// that opened it.
    SubLayerActive(KeyCode),
}

impl LeaderState {
    #[must_use]
    pub const fn is_active(self) -> bool { !matches!(self, Self::Idle) }
}

struct Inner {
    state: Observable<LeaderState>,
    keymap: Keymap,
    timeout: Option<Duration>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
    actions: mpsc::Sender<KeyAction>,
    runtime: Option<Handle>,
}

impl Inner {
    fn state(&self) -> LeaderState { *Observable::get(&self.state) }

    fn set_state(&mut self, next: LeaderState) {
        if let Some(previous) = Observable::set_if_not_eq(&mut self.state, next) {
            tracing::debug!(from = ?previous, to = ?next, "leader state changed");
        }
    }

    fn cancel_timer(&mut self) {
        self.generation += 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn exit(&mut self) {
        self.cancel_timer();
        self.set_state(LeaderState::Idle);
    }

    fn dispatch(&self, action: KeyAction) {
        match self.actions.try_send(action) {
            Ok(()) => tracing::debug!(%action, "leader action dispatched"),
            Err(TrySendError::Full(_)) => tracing::warn!(%action, "action channel full, dropping"),
            Err(TrySendError::Closed(_)) => tracing::debug!(%action, "action receiver gone"),
        }
    }
}

/// Cloneable handle to the leader-key state machine.
#[derive(Clone)]
pub struct LeaderKeyMachine {
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for LeaderKeyMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("LeaderKeyMachine")
            .field("state", &inner.state())
            .field("timeout", &inner.timeout)
            .field("bindings", &inner.keymap.len())
            .finish_non_exhaustive()
    }
}

impl LeaderKeyMachine {
    /// Creates an idle machine sending resolved actions into `actions`.
    ///
    /// Timeouts are scheduled on the tokio runtime current at construction.
    /// Outside a runtime leader mode never times out.
    #[must_use]
    pub fn new(keymap: Keymap, timeout: Option<Duration>, actions: mpsc::Sender<KeyAction>) -> Self {
        let runtime = Handle::try_current().ok();
        if runtime.is_none() && timeout.is_some() {
            tracing::warn!("no tokio runtime, leader timeout disabled");
        }
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: Observable::new(LeaderState::Idle),
                keymap,
                timeout,
                generation: 0,
                timer: None,
                actions,
                runtime,
            })),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> LeaderState { self.inner.lock().state() }

    /// Subscribes to state changes. Only actual changes are delivered.
    #[must_use]
    pub fn subscribe(&self) -> Subscriber<LeaderState> { Observable::subscribe(&self.inner.lock().state) }

    /// Installs a new keymap and timeout. An armed timeout is re-armed with
    /// the new duration.
    pub fn reconfigure(&self, keymap: Keymap, timeout: Option<Duration>) {
        let mut inner = self.inner.lock();
        inner.keymap = keymap;
        inner.timeout = timeout;
        if !inner.keymap.is_enabled() {
            inner.exit();
        } else if inner.state().is_active() {
            self.arm_timeout(&mut inner);
        }
    }

    /// Feeds one raw key event. Returns whether the event was consumed.
    ///
    /// `modifier_flags` are the raw event flags; bits other than
    /// shift/control/option/command are ignored.
    pub fn handle_key_event(&self, key_code: KeyCode, modifier_flags: u64, is_key_down: bool) -> bool {
        if !is_key_down {
            return false;
        }

        let chord = KeyChord::new(key_code, Modifiers::from_flags(modifier_flags));
        let mut inner = self.inner.lock();

        match inner.state() {
            LeaderState::Idle => {
                if !inner.keymap.is_enabled() || chord != inner.keymap.trigger() {
                    return false;
                }
                inner.set_state(LeaderState::LeaderActive);
                self.arm_timeout(&mut inner);
                true
            }
            LeaderState::LeaderActive | LeaderState::SubLayerActive(_) => {
                if chord == inner.keymap.trigger() {
                    inner.exit();
                    return true;
                }

                let Some(binding) = inner.keymap.lookup(&chord) else {
                    tracing::trace!(key_code, "unbound key swallowed in leader mode");
                    self.arm_timeout(&mut inner);
                    return true;
                };
                let (action, stays) = (binding.action, binding.stays_in_leader);

                inner.dispatch(action);
                if stays {
                    inner.set_state(LeaderState::LeaderActive);
                    self.arm_timeout(&mut inner);
                } else {
                    inner.exit();
                }
                true
            }
        }
    }

    /// Opens a sub-layer. Only valid while the leader layer is active.
    ///
    /// Bindings never compile into sub-layers, so nothing in the crate calls
    /// this. It keeps [`LeaderState::SubLayerActive`] reachable for hosts
    /// that drive their own sub-layer keys.
    pub fn enter_sub_layer(&self, key_code: KeyCode) -> bool {
        let mut inner = self.inner.lock();
        if inner.state() != LeaderState::LeaderActive {
            return false;
        }
        inner.set_state(LeaderState::SubLayerActive(key_code));
        self.arm_timeout(&mut inner);
        true
    }

    /// Leaves leader mode. Does nothing when already idle.
    pub fn exit_leader_mode(&self) { self.inner.lock().exit(); }

    fn arm_timeout(&self, inner: &mut Inner) {
        inner.cancel_timer();
        let (Some(timeout), Some(runtime)) = (inner.timeout, inner.runtime.as_ref()) else {
            return;
        };

        let generation = inner.generation;
        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        inner.timer = Some(runtime.spawn(async move {
            tokio::time::sleep(timeout).await;
            if let Some(shared) = weak.upgrade() {
                let mut inner = shared.lock();
                if inner.generation == generation && inner.state().is_active() {
                    tracing::debug!("leader mode timed out");
                    inner.timer = None;
                    inner.exit();
                }
            }
        }));
    }
}

// ============================================================================
// Tests
// ============================================================================
