//! Tiling orchestrator.
//!
//! [`TilingManager`] ties the collaborators together: it listens for window
//! and screen changes, debounces them into tiling passes, keeps the
//! per-monitor container state in line with what is on screen, runs the
//! layout engine, orders the z-stack and hands the resulting frames to the
//! animation engine.
//!
//! A pass never runs concurrently with another one: every pass holds the
//! tile gate until its animation batch resolves, so at most one batch is in
//! flight. Event bursts collapse in the debouncer, so only the latest state
//! is ever tiled.

mod actions;
pub mod partition;
pub mod stable_order;
pub mod zorder;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
pub use partition::{monitor_index_for, partition_by_monitor};
use serde::Serialize;
pub use stable_order::StableOrder;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
pub use zorder::{RaiseList, raise_sequence};

use super::animation::{AnimationEngine, AnimationResult, AnimationSettings, AnimationTarget};
use super::constants::repair::MAX_REJECTION_RETRIES;
use super::debouncer::Debouncer;
use super::error::TilingError;
use super::events::{EVENT_CHANNEL_CAPACITY, ScreenEvent, SubscriptionId, WindowEvent};
use super::layout::{self, Gaps, LayoutInput};
use super::rules::{RuleClass, classify};
use super::screen::ScreenSource;
use super::state::{LayoutId, MonitorId, MonitorTilingState, Pid, TilingState, WindowId};
use super::window::{WindowInfo, WindowSource};
use super::window_ops::WindowOps;
use crate::config::{ConcertinaConfig, ConfigStore};

// ============================================================================
// Types
// ============================================================================

/// Externally observable outcome of a tiling pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "kebab-case")]
pub enum TilingResult {
    /// The batch completed; carries the number of placed windows.
    Success(usize),
    /// There was nothing on screen to tile.
    NoWindowsToTile,
    /// The batch was superseded before it completed.
    Cancelled,
    Failed(String),
}

impl TilingResult {
    fn from_animation(result: AnimationResult, placed: usize) -> Self {
        match result {
            AnimationResult::Completed => Self::Success(placed),
            AnimationResult::Cancelled => Self::Cancelled,
            AnimationResult::Failed(reason) => Self::Failed(reason),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool { matches!(self, Self::Success(_)) }
}

/// Bookkeeping that outlives a single pass.
#[derive(Debug, Default)]
struct Tracking {
    stable_order: StableOrder,
    last_focused_tileable: Option<WindowId>,
    /// Focused window as of the last pass.
    last_seen_focus: Option<WindowId>,
    /// When the tiler last raised or focused a window itself.
    last_raise: Option<Instant>,
    /// Windows known to refuse size changes.
    known_rejections: HashSet<WindowId>,
}

struct Subscriptions {
    window: SubscriptionId,
    screen: SubscriptionId,
    task: JoinHandle<()>,
}

/// Frames and raises computed for one pass.
#[derive(Debug, Default)]
struct PassPlan {
    targets: Vec<AnimationTarget>,
    raises: Vec<(WindowId, Pid)>,
    placed: usize,
}

struct ManagerInner {
    windows: Arc<dyn WindowSource>,
    screens: Arc<dyn ScreenSource>,
    ops: Arc<dyn WindowOps>,
    engine: AnimationEngine,
    config: Arc<ConfigStore>,
    state: Mutex<TilingState>,
    tracking: Mutex<Tracking>,
    tile_gate: tokio::sync::Mutex<()>,
    debouncer: Debouncer,
    running: AtomicBool,
    initial_tile: AtomicBool,
    last_result: Mutex<Option<TilingResult>>,
    subscriptions: Mutex<Option<Subscriptions>>,
}

// ============================================================================
// Tiling Manager
// ============================================================================

/// Cloneable handle to the orchestrator.
#[derive(Clone)]
pub struct TilingManager {
    inner: Arc<ManagerInner>,
}

impl std::fmt::Debug for TilingManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TilingManager")
            .field("running", &self.is_running())
            .field("last_result", &self.last_result())
            .finish_non_exhaustive()
    }
}

impl TilingManager {
    /// Creates a stopped manager.
    #[must_use]
    pub fn new(
        windows: Arc<dyn WindowSource>,
        screens: Arc<dyn ScreenSource>,
        ops: Arc<dyn WindowOps>,
        config: Arc<ConfigStore>,
    ) -> Self {
        let snapshot = config.snapshot();
        let engine =
            AnimationEngine::new(Arc::clone(&ops), AnimationSettings::from_config(&snapshot.animations));
        Self {
            inner: Arc::new(ManagerInner {
                windows,
                screens,
                ops,
                engine,
                config,
                state: Mutex::new(TilingState::new()),
                tracking: Mutex::new(Tracking::default()),
                tile_gate: tokio::sync::Mutex::new(()),
                debouncer: Debouncer::new(snapshot.tiling.debounce()),
                running: AtomicBool::new(false),
                initial_tile: AtomicBool::new(false),
                last_result: Mutex::new(None),
                subscriptions: Mutex::new(None),
            }),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Runs the initial pass, then starts listening for changes.
    ///
    /// The initial pass completes before any subscription exists, so an
    /// early event cannot race it into an animated retile. Returns `None`
    /// when the manager was already running.
    pub async fn start(&self) -> Option<TilingResult> {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            tracing::debug!("tiling manager already running");
            return None;
        }

        self.inner.initial_tile.store(true, Ordering::SeqCst);
        let result = self.perform_tile().await;
        self.inner.initial_tile.store(false, Ordering::SeqCst);

        let (window_tx, window_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (screen_tx, screen_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let window = self.inner.windows.subscribe(window_tx);
        let screen = self.inner.screens.subscribe(screen_tx);
        let task = tokio::spawn(event_loop(Arc::downgrade(&self.inner), window_rx, screen_rx));
        *self.inner.subscriptions.lock() = Some(Subscriptions { window, screen, task });

        tracing::info!(?result, "tiling started");
        Some(result)
    }

    /// Stops listening and drops any pending retile.
    pub fn stop(&self) {
        if !self.inner.running.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(subscriptions) = self.inner.subscriptions.lock().take() {
            self.inner.windows.unsubscribe(subscriptions.window);
            self.inner.screens.unsubscribe(subscriptions.screen);
            subscriptions.task.abort();
        }
        self.inner.debouncer.cancel();
        tracing::info!("tiling stopped");
    }

    #[must_use]
    pub fn is_running(&self) -> bool { self.inner.running.load(Ordering::SeqCst) }

    /// Result of the most recent pass.
    #[must_use]
    pub fn last_result(&self) -> Option<TilingResult> { self.inner.last_result.lock().clone() }

    #[must_use]
    pub fn has_pending_retile(&self) -> bool { self.inner.debouncer.is_pending() }

    /// Drops every monitor's container state. The next pass starts over.
    pub fn reset_state(&self) {
        self.inner.state.lock().reset();
        tracing::info!("tiling state reset");
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn engine(&self) -> &AnimationEngine { &self.inner.engine }

    #[must_use]
    pub fn config(&self) -> &Arc<ConfigStore> { &self.inner.config }

    /// Snapshot of a monitor's container state.
    #[must_use]
    pub fn monitor_state(&self, monitor_id: MonitorId) -> Option<MonitorTilingState> {
        self.inner.state.lock().monitor(monitor_id).cloned()
    }

    /// Managed window ids in stable order.
    #[must_use]
    pub fn stable_order(&self) -> Vec<WindowId> {
        self.inner.tracking.lock().stable_order.as_slice().to_vec()
    }

    /// Windows reclassified as fixed after refusing a size change.
    #[must_use]
    pub fn rejected_windows(&self) -> HashSet<WindowId> {
        self.inner.tracking.lock().known_rejections.clone()
    }

    // ========================================================================
    // Event Handling
    // ========================================================================

    /// Reacts to a window event. Returns whether a retile was scheduled.
    ///
    /// Moves and resizes are ignored: they come from the user or from the
    /// tiler itself. Focus events are dropped within the focus guard after
    /// the tiler raised a window, and when they report the window that was
    /// already focused.
    pub fn handle_window_event(&self, event: &WindowEvent) -> bool {
        if !event.triggers_retile() {
            tracing::trace!(event = event.name(), "window event ignored");
            return false;
        }
        if let WindowEvent::Focused(window_id) = event
            && self.should_skip_focus(*window_id)
        {
            tracing::trace!(%window_id, "focus event suppressed");
            return false;
        }
        self.schedule_retile();
        true
    }

    fn should_skip_focus(&self, window_id: WindowId) -> bool {
        let guard = self.inner.config.snapshot().tiling.focus_guard();
        let tracking = self.inner.tracking.lock();
        tracking.last_raise.is_some_and(|at| at.elapsed() < guard)
            || tracking.last_seen_focus == Some(window_id)
    }

    /// Schedules a debounced pass, replacing any pending one.
    pub fn schedule_retile(&self) {
        self.inner.debouncer.set_delay(self.inner.config.snapshot().tiling.debounce());
        let manager = self.clone();
        self.inner.debouncer.schedule(move || async move {
            manager.perform_tile().await;
        });
    }

    fn note_raise(&self) { self.inner.tracking.lock().last_raise = Some(Instant::now()); }

    // ========================================================================
    // Tiling Pass
    // ========================================================================

    /// Runs a full tiling pass and waits for its animation to resolve.
    ///
    /// When windows refuse a size change during the pass, they are
    /// reclassified as fixed and the pass runs again right away, at most
    /// [`MAX_REJECTION_RETRIES`] extra times.
    pub async fn perform_tile(&self) -> TilingResult {
        let _gate = self.inner.tile_gate.lock().await;

        let mut retries = 0;
        let result = loop {
            let result = self.tile_pass().await;
            if !self.absorb_rejections() {
                break result;
            }
            if retries >= MAX_REJECTION_RETRIES {
                tracing::warn!(retries, "windows keep rejecting resizes, giving up for this pass");
                break result;
            }
            retries += 1;
            tracing::debug!(retries, "windows rejected a resize, retiling");
        };

        tracing::debug!(?result, "tiling pass finished");
        *self.inner.last_result.lock() = Some(result.clone());
        result
    }

    /// Folds the engine's rejections into the permanent set. Returns whether
    /// any of them were new.
    fn absorb_rejections(&self) -> bool {
        let rejected = self.inner.engine.rejected_windows();
        self.inner.engine.clear_rejections();

        let mut tracking = self.inner.tracking.lock();
        let before = tracking.known_rejections.len();
        tracking.known_rejections.extend(rejected);
        tracking.known_rejections.len() > before
    }

    async fn tile_pass(&self) -> TilingResult {
        let config = self.inner.config.snapshot();
        let plan = match self.plan_pass(&config) {
            Ok(Some(plan)) => plan,
            Ok(None) => return TilingResult::NoWindowsToTile,
            Err(err) => {
                tracing::warn!(error = %err, "tiling pass failed");
                return TilingResult::Failed(err.to_string());
            }
        };

        if !plan.raises.is_empty() {
            let raised = self.inner.engine.raise_windows_in_order(&plan.raises);
            self.note_raise();
            tracing::trace!(raised, "z-order updated");
        }

        let initial = self.inner.initial_tile.load(Ordering::SeqCst);
        let duration = config.animations.duration_for(initial);
        self.inner.engine.configure(AnimationSettings::from_config(&config.animations));

        tracing::debug!(windows = plan.placed, moving = plan.targets.len(), ?duration, "applying layout");
        let result = self.inner.engine.animate_batch(plan.targets, duration).await;
        TilingResult::from_animation(result, plan.placed)
    }

    /// Brings state in line with the screen and computes the pass.
    ///
    /// Returns `Ok(None)` when there is nothing to tile.
    fn plan_pass(&self, config: &ConcertinaConfig) -> Result<Option<PassPlan>, TilingError> {
        let focused = self.inner.windows.focused_window();
        let mut tracking = self.inner.tracking.lock();

        let windows: Vec<WindowInfo> = self
            .inner
            .windows
            .visible_windows()
            .into_iter()
            .filter_map(|mut window| {
                match classify(&config.tiling, &window) {
                    RuleClass::Ignored => return None,
                    RuleClass::Floating => window.is_floating = true,
                    RuleClass::Managed => {}
                }
                if tracking.known_rejections.contains(&window.id) {
                    window.is_resizable = false;
                }
                Some(window)
            })
            .collect();

        tracking.last_seen_focus = focused.map(|f| f.id);

        if windows.is_empty() {
            tracking.stable_order.clear();
            return Ok(None);
        }

        let present: HashSet<WindowId> = windows.iter().map(|w| w.id).collect();
        tracking.known_rejections.retain(|id| present.contains(id));

        let managed_ids: Vec<WindowId> =
            windows.iter().filter(|w| !w.is_floating).map(|w| w.id).collect();
        tracking.stable_order.update(&managed_ids);

        let monitors = self.inner.screens.connected_monitors();
        if monitors.is_empty() {
            return Err(TilingError::NoMonitorsDetected);
        }

        let focused_window = focused.and_then(|f| windows.iter().find(|w| w.id == f.id));
        if let Some(window) = focused_window.filter(|w| w.is_tileable()) {
            tracking.last_focused_tileable = Some(window.id);
        }
        let anchor = tracking.last_focused_tileable;

        let managed: Vec<&WindowInfo> =
            tracking.stable_order.ordered(&windows).into_iter().filter(|w| !w.is_floating).collect();
        drop(tracking);

        let buckets = partition_by_monitor(&managed, &monitors);
        let by_id: HashMap<WindowId, &WindowInfo> = windows.iter().map(|w| (w.id, w)).collect();
        let gaps = Gaps::from_config(&config.tiling);
        let mut plan = PassPlan::default();
        let mut state = self.inner.state.lock();

        let connected: Vec<MonitorId> = monitors.iter().map(|m| m.id).collect();
        let placed: HashSet<WindowId> = managed.iter().map(|w| w.id).collect();
        state.release_disconnected(&connected, &present, &placed);

        for (monitor, bucket) in monitors.iter().zip(&buckets) {
            let monitor_state = state.monitor_mut(monitor.id);
            let ids: Vec<WindowId> = bucket.iter().map(|w| w.id).collect();
            monitor_state.reconcile(&ids);

            let layout = monitor_state.active_layout().unwrap_or(config.tiling.default_layout);
            let frames = layout::container_frames(layout, &monitor.visible_frame, &gaps);
            monitor_state.apply_layout(layout, &frames, None);

            if let Some(window) = focused_window.filter(|w| w.is_tileable()) {
                monitor_state.update_focused_container(window.id);
            }

            plan_monitor(
                monitor_state,
                layout,
                &by_id,
                anchor,
                focused_window,
                config.tiling.accordion_offset,
                &mut plan,
            );
        }

        Ok(Some(plan))
    }
}

/// Runs the layout engine over every container of a monitor and collects
/// the resulting frames and raises into `plan`.
fn plan_monitor(
    monitor_state: &MonitorTilingState,
    layout_id: LayoutId,
    windows: &HashMap<WindowId, &WindowInfo>,
    anchor: Option<WindowId>,
    focused: Option<&WindowInfo>,
    offset: f64,
    plan: &mut PassPlan,
) {
    let orientation = layout::orientation(layout_id);

    for container in monitor_state.containers() {
        let members: Vec<WindowInfo> = container
            .window_ids()
            .iter()
            .filter_map(|id| windows.get(id).map(|&w| w.clone()))
            .collect();
        if members.is_empty() {
            continue;
        }

        // The anchor freezes the accordion while a fixed window has focus.
        let focus = anchor.filter(|&id| container.contains(id)).or_else(|| container.focused_window_id());
        let input = LayoutInput {
            windows: &members,
            focused_window_id: focus,
            container: container.frame,
            offset,
            orientation,
        };

        for placement in layout::calculate(&input) {
            let Some(window) = windows.get(&placement.window_id) else {
                continue;
            };
            plan.placed += 1;
            let target = AnimationTarget::new(placement.window_id, placement.owner_pid, window.frame, placement.frame);
            if !target.is_stationary() {
                plan.targets.push(target);
            }
        }

        let Some(focused) = focused.filter(|w| container.contains(w.id)) else {
            continue;
        };
        if focused.is_tileable() {
            let ring: Vec<WindowId> = members.iter().filter(|w| w.is_tileable()).map(|w| w.id).collect();
            plan.raises.extend(
                raise_sequence(&ring, focused.id)
                    .into_iter()
                    .filter_map(|id| windows.get(&id).map(|w| (id, w.pid))),
            );
        } else if focused.is_fixed() {
            plan.raises.push((focused.id, focused.pid));
        }
    }
}

async fn event_loop(
    manager: Weak<ManagerInner>,
    mut window_rx: mpsc::Receiver<WindowEvent>,
    mut screen_rx: mpsc::Receiver<ScreenEvent>,
) {
    loop {
        tokio::select! {
            Some(event) = window_rx.recv() => {
                let Some(inner) = manager.upgrade() else { break };
                TilingManager { inner }.handle_window_event(&event);
            }
            Some(event) = screen_rx.recv() => {
                let Some(inner) = manager.upgrade() else { break };
                tracing::debug!(?event, "screen configuration changed");
                TilingManager { inner }.schedule_retile();
            }
            else => break,
        }
    }
    tracing::debug!("event loop stopped");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::WindowRule;
    use crate::tiling::screen::MonitorInfo;
    use crate::tiling::state::Rect;
    use crate::tiling::virtual_desktop::VirtualDesktop;

    fn window(id: u32) -> WindowInfo {
        WindowInfo::new(WindowId(id), 100 + i32::try_from(id).unwrap(), "App", Rect::new(100.0, 100.0, 800.0, 600.0))
    }

    fn setup(config: ConcertinaConfig) -> (Arc<VirtualDesktop>, TilingManager) {
        let desktop = Arc::new(VirtualDesktop::with_single_monitor(1920.0, 1080.0));
        let manager = TilingManager::new(
            desktop.clone(),
            desktop.clone(),
            desktop.clone(),
            Arc::new(ConfigStore::new(config)),
        );
        (desktop, manager)
    }

    fn instant_config() -> ConcertinaConfig {
        let mut config = ConcertinaConfig::default();
        config.animations.enabled = false;
        config
    }

    mod pass_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_single_window_monocle_exact_rect() {
            let (desktop, manager) = setup(ConcertinaConfig::default());
            desktop.open_window(window(1));
            desktop.activate(WindowId(1));

            assert_eq!(manager.start().await, Some(TilingResult::Success(1)));
            assert_eq!(desktop.frame_of(WindowId(1)), Some(Rect::new(8.0, 8.0, 1904.0, 1064.0)));
            // The initial pass writes directly without animating.
            assert_eq!(desktop.frame_writes(), 1);
            manager.stop();
        }

        #[tokio::test(start_paused = true)]
        async fn test_empty_desktop_has_nothing_to_tile() {
            let (_desktop, manager) = setup(ConcertinaConfig::default());
            assert_eq!(manager.perform_tile().await, TilingResult::NoWindowsToTile);
            assert_eq!(manager.last_result(), Some(TilingResult::NoWindowsToTile));
            assert!(manager.stable_order().is_empty());
        }

        #[tokio::test(start_paused = true)]
        async fn test_no_monitors_fails_the_pass_only() {
            let desktop = Arc::new(VirtualDesktop::new());
            let manager = TilingManager::new(
                desktop.clone(),
                desktop.clone(),
                desktop.clone(),
                Arc::new(ConfigStore::new(instant_config())),
            );
            desktop.open_window(window(1));

            assert_eq!(manager.perform_tile().await, TilingResult::Failed("no monitors detected".into()));

            desktop.add_monitor(
                MonitorInfo::new(MonitorId(1), "Main", Rect::new(0.0, 0.0, 1920.0, 1080.0)).with_main(true),
            );
            assert_eq!(manager.perform_tile().await, TilingResult::Success(1));
        }

        #[tokio::test(start_paused = true)]
        async fn test_accordion_of_three_windows() {
            let (desktop, manager) = setup(instant_config());
            for id in 1..=3 {
                desktop.open_window(window(id));
            }
            desktop.activate(WindowId(2));

            assert_eq!(manager.perform_tile().await, TilingResult::Success(3));
            assert_eq!(desktop.frame_of(WindowId(1)).map(|f| f.x), Some(8.0));
            assert_eq!(desktop.frame_of(WindowId(2)).map(|f| f.x), Some(40.0));
            assert_eq!(desktop.frame_of(WindowId(3)).map(|f| f.x), Some(72.0));
            assert_eq!(desktop.frame_of(WindowId(2)).map(|f| f.width), Some(1904.0 - 64.0));
        }

        #[tokio::test(start_paused = true)]
        async fn test_raises_others_then_prev_then_next() {
            let (desktop, manager) = setup(instant_config());
            for id in 1..=5 {
                desktop.open_window(window(id));
            }
            desktop.activate(WindowId(3));
            desktop.clear_log();

            manager.perform_tile().await;
            assert_eq!(
                desktop.raised(),
                vec![WindowId(1), WindowId(5), WindowId(2), WindowId(4)]
            );
            assert_eq!(desktop.focused_window().map(|f| f.id), Some(WindowId(3)));
        }

        #[tokio::test(start_paused = true)]
        async fn test_second_pass_with_no_changes_writes_nothing() {
            let (desktop, manager) = setup(instant_config());
            desktop.open_window(window(1));
            desktop.open_window(window(2));

            manager.perform_tile().await;
            desktop.clear_log();
            manager.perform_tile().await;
            assert_eq!(desktop.frame_writes(), 0);
        }

        #[tokio::test(start_paused = true)]
        async fn test_fixed_focus_freezes_accordion() {
            let (desktop, manager) = setup(instant_config());
            for id in 1..=3 {
                desktop.open_window(window(id));
            }
            desktop.open_window(
                WindowInfo::new(WindowId(9), 109, "Fixed", Rect::new(50.0, 50.0, 400.0, 300.0))
                    .with_resizable(false),
            );
            desktop.activate(WindowId(2));
            manager.perform_tile().await;

            let frames: Vec<_> = (1..=3).map(|id| desktop.frame_of(WindowId(id))).collect();
            assert_eq!(desktop.frame_of(WindowId(9)), Some(Rect::new(760.0, 390.0, 400.0, 300.0)));

            desktop.activate(WindowId(9));
            desktop.clear_log();
            assert_eq!(manager.perform_tile().await, TilingResult::Success(4));

            let after: Vec<_> = (1..=3).map(|id| desktop.frame_of(WindowId(id))).collect();
            assert_eq!(after, frames);
            assert_eq!(desktop.raised(), vec![WindowId(9)]);
        }

        #[tokio::test(start_paused = true)]
        async fn test_timed_pass_animates() {
            let mut config = ConcertinaConfig::default();
            config.animations.duration = 100;
            let (desktop, manager) = setup(config);
            desktop.open_window(window(1));

            assert_eq!(manager.perform_tile().await, TilingResult::Success(1));
            assert!(desktop.frame_writes() > 1);
            assert_eq!(desktop.frame_of(WindowId(1)), Some(Rect::new(8.0, 8.0, 1904.0, 1064.0)));
        }
    }

    mod rule_tests {
        use super::*;

        fn rule(app_name: &str) -> WindowRule {
            WindowRule { app_name: Some(app_name.into()), ..Default::default() }
        }

        #[tokio::test(start_paused = true)]
        async fn test_floating_and_ignored_windows_are_left_alone() {
            let mut config = instant_config();
            config.tiling.floating.push(rule("Calculator"));
            config.tiling.ignore.push(rule("Dock"));
            let (desktop, manager) = setup(config);

            let calculator = WindowInfo::new(WindowId(2), 2, "Calculator", Rect::new(5.0, 5.0, 200.0, 300.0));
            let dock = WindowInfo::new(WindowId(3), 3, "Dock", Rect::new(0.0, 1000.0, 1920.0, 80.0));
            desktop.open_window(window(1));
            desktop.open_window(calculator.clone());
            desktop.open_window(dock.clone());

            assert_eq!(manager.perform_tile().await, TilingResult::Success(1));
            assert_eq!(desktop.frame_of(WindowId(2)), Some(calculator.frame));
            assert_eq!(desktop.frame_of(WindowId(3)), Some(dock.frame));
            assert_eq!(manager.stable_order(), vec![WindowId(1)]);
        }

        #[tokio::test(start_paused = true)]
        async fn test_only_ignored_windows_means_nothing_to_tile() {
            let mut config = instant_config();
            config.tiling.ignore.push(rule("Dock"));
            let (desktop, manager) = setup(config);
            desktop.open_window(WindowInfo::new(WindowId(3), 3, "Dock", Rect::new(0.0, 0.0, 10.0, 10.0)));

            assert_eq!(manager.perform_tile().await, TilingResult::NoWindowsToTile);
        }
    }

    mod event_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_burst_of_events_collapses_into_one_pass() {
            let (desktop, manager) = setup(instant_config());
            manager.start().await;

            for id in 1..=5 {
                desktop.open_window(window(id));
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            assert!(manager.has_pending_retile());

            tokio::time::sleep(Duration::from_millis(100)).await;
            assert!(!manager.has_pending_retile());
            assert_eq!(manager.last_result(), Some(TilingResult::Success(5)));
            manager.stop();
        }

        #[tokio::test(start_paused = true)]
        async fn test_moves_and_resizes_are_ignored() {
            let (_desktop, manager) = setup(instant_config());
            assert!(!manager.handle_window_event(&WindowEvent::Moved(WindowId(1), Rect::zero())));
            assert!(!manager.handle_window_event(&WindowEvent::Resized(WindowId(1), Rect::zero())));
            assert!(!manager.has_pending_retile());
        }

        #[tokio::test(start_paused = true)]
        async fn test_focus_guard_after_raise() {
            let (desktop, manager) = setup(instant_config());
            desktop.open_window(window(1));
            desktop.open_window(window(2));
            desktop.activate(WindowId(1));
            manager.perform_tile().await;

            // The pass raised window 2; its echo is dropped.
            assert!(!manager.handle_window_event(&WindowEvent::Focused(WindowId(2))));

            tokio::time::sleep(Duration::from_millis(250)).await;
            assert!(manager.handle_window_event(&WindowEvent::Focused(WindowId(2))));
        }

        #[tokio::test(start_paused = true)]
        async fn test_focus_on_already_focused_window_is_dropped() {
            let (desktop, manager) = setup(instant_config());
            desktop.open_window(window(1));
            desktop.activate(WindowId(1));
            manager.perform_tile().await;

            tokio::time::sleep(Duration::from_millis(250)).await;
            assert!(!manager.handle_window_event(&WindowEvent::Focused(WindowId(1))));
        }

        #[tokio::test(start_paused = true)]
        async fn test_stop_unsubscribes_and_cancels() {
            let (desktop, manager) = setup(instant_config());
            manager.start().await;
            assert!(manager.is_running());

            desktop.open_window(window(1));
            tokio::time::sleep(Duration::from_millis(10)).await;
            manager.stop();
            assert!(!manager.is_running());
            assert!(!manager.has_pending_retile());

            desktop.open_window(window(2));
            tokio::time::sleep(Duration::from_millis(200)).await;
            assert!(!manager.has_pending_retile());
            assert_eq!(manager.last_result(), Some(TilingResult::NoWindowsToTile));
        }

        #[tokio::test(start_paused = true)]
        async fn test_start_twice_is_a_no_op() {
            let (_desktop, manager) = setup(instant_config());
            assert!(manager.start().await.is_some());
            assert!(manager.start().await.is_none());
            manager.stop();
        }
    }

    mod state_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_reset_state_drops_monitors() {
            let (desktop, manager) = setup(instant_config());
            desktop.open_window(window(1));
            manager.perform_tile().await;
            assert!(manager.monitor_state(MonitorId(1)).is_some());

            manager.reset_state();
            assert!(manager.monitor_state(MonitorId(1)).is_none());
        }

        #[tokio::test(start_paused = true)]
        async fn test_default_layout_from_config() {
            let mut config = instant_config();
            config.tiling.default_layout = LayoutId::Columns2;
            let (desktop, manager) = setup(config);
            for id in 1..=4 {
                desktop.open_window(window(id));
            }
            manager.perform_tile().await;

            let state = manager.monitor_state(MonitorId(1)).unwrap();
            assert_eq!(state.active_layout(), Some(LayoutId::Columns2));
            assert_eq!(state.containers().len(), 2);
            assert_eq!(state.containers()[0].window_ids(), &[WindowId(1), WindowId(3)]);
            assert_eq!(state.containers()[1].window_ids(), &[WindowId(2), WindowId(4)]);
        }
    }
}
