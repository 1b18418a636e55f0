//! Wiring for a running tiler.
//!
//! [`Concertina`] owns the orchestrator and the leader machine, routes leader
//! actions into the orchestrator, and applies configuration reloads to both.
//! The window system comes in through the three collaborator traits, so the
//! same wiring runs against a real window server or a [`VirtualDesktop`].
//!
//! [`VirtualDesktop`]: crate::tiling::VirtualDesktop

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::{ConcertinaConfig, ConfigStore, watch_config_file};
use crate::error::ConcertinaError;
use crate::hotkey::{ACTION_CHANNEL_CAPACITY, LeaderKeyMachine, compile_bindings};
use crate::tiling::{ScreenSource, TilingManager, TilingResult, WindowOps, WindowSource};

/// A running tiler.
#[derive(Debug)]
pub struct Concertina {
    manager: TilingManager,
    leader: LeaderKeyMachine,
    actions: JoinHandle<()>,
    watcher: Option<std::thread::JoinHandle<()>>,
}

impl Concertina {
    /// Compiles the leader layer, runs the initial tile and starts listening.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error when the leader trigger does not parse.
    pub async fn start(
        windows: Arc<dyn WindowSource>,
        screens: Arc<dyn ScreenSource>,
        ops: Arc<dyn WindowOps>,
        config: Arc<ConfigStore>,
    ) -> Result<(Self, Option<TilingResult>), ConcertinaError> {
        let snapshot = config.snapshot();
        let keymap = compile_bindings(&snapshot.leader)?;
        tracing::info!(bindings = keymap.len(), trigger = %snapshot.leader.trigger, "leader layer compiled");

        let (tx, rx) = mpsc::channel(ACTION_CHANNEL_CAPACITY);
        let leader = LeaderKeyMachine::new(keymap, snapshot.leader.timeout(), tx);
        let manager = TilingManager::new(windows, screens, ops, config);

        let result = manager.start().await;
        let actions = tokio::spawn({
            let manager = manager.clone();
            async move { manager.run_actions(rx).await }
        });

        Ok((Self { manager, leader, actions, watcher: None }, result))
    }

    /// Watches the configuration file and applies changes as they land.
    ///
    /// Returns false when the configuration is not backed by a file.
    pub fn watch_config(&mut self) -> bool {
        if self.watcher.is_some() {
            return true;
        }
        let runtime = Handle::current();
        let manager = self.manager.clone();
        let leader = self.leader.clone();
        self.watcher = watch_config_file(Arc::clone(self.manager.config()), move |config| {
            let _guard = runtime.enter();
            apply_config(&manager, &leader, config);
        });
        self.watcher.is_some()
    }

    #[must_use]
    pub const fn manager(&self) -> &TilingManager { &self.manager }

    /// The leader machine. Feed it raw key events.
    #[must_use]
    pub const fn leader(&self) -> &LeaderKeyMachine { &self.leader }

    /// Stops tiling and leaves leader mode.
    pub fn stop(self) {
        self.manager.stop();
        self.leader.exit_leader_mode();
        self.actions.abort();
        tracing::info!("concertina stopped");
    }
}

/// Pushes a reloaded configuration into the leader machine and retiles.
///
/// A reload with an invalid trigger keeps the previous keymap.
fn apply_config(manager: &TilingManager, leader: &LeaderKeyMachine, config: &Arc<ConcertinaConfig>) {
    match compile_bindings(&config.leader) {
        Ok(keymap) => leader.reconfigure(keymap, config.leader.timeout()),
        Err(err) => tracing::warn!(error = %err, "keeping previous leader bindings"),
    }
    manager.schedule_retile();
}
