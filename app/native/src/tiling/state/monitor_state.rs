//! Per-monitor tiling state: the active layout and its containers.
//!
//! A `MonitorTilingState` owns every container on one display. Containers are
//! replaced wholesale on layout switch or redistribution, and container ids
//! are allocated monotonically so stale ids can never alias a new container.

use std::collections::HashMap;

use super::container::{Container, WindowIdList};
use super::types::{ContainerId, Direction, LayoutId, MonitorId, Rect, WindowId};

/// Tiling state for a single display.
#[derive(Clone, Debug)]
pub struct MonitorTilingState {
    monitor_id: MonitorId,
    active_layout: Option<LayoutId>,
    containers: Vec<Container>,
    focused_container_id: Option<ContainerId>,
    next_container_id: u64,
}

impl MonitorTilingState {
    /// Creates an empty state with no layout applied yet.
    #[must_use]
    pub const fn new(monitor_id: MonitorId) -> Self {
        Self {
            monitor_id,
            active_layout: None,
            containers: Vec::new(),
            focused_container_id: None,
            next_container_id: 1,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub const fn monitor_id(&self) -> MonitorId { self.monitor_id }

    #[must_use]
    pub const fn active_layout(&self) -> Option<LayoutId> { self.active_layout }

    #[must_use]
    pub fn containers(&self) -> &[Container] { &self.containers }

    #[must_use]
    pub const fn focused_container_id(&self) -> Option<ContainerId> { self.focused_container_id }

    #[must_use]
    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn focused_container(&self) -> Option<&Container> {
        self.focused_container_id.and_then(|id| self.container(id))
    }

    /// Returns the container holding `window_id`.
    #[must_use]
    pub fn container_of(&self, window_id: WindowId) -> Option<&Container> {
        self.containers.iter().find(|c| c.contains(window_id))
    }

    /// The window focused inside the focused container.
    #[must_use]
    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.focused_container().and_then(Container::focused_window_id)
    }

    /// Every member window, container by container, in ring order.
    #[must_use]
    pub fn window_ids(&self) -> WindowIdList {
        self.containers.iter().flat_map(|c| c.window_ids().iter().copied()).collect()
    }

    #[must_use]
    pub fn contains_window(&self, window_id: WindowId) -> bool {
        self.container_of(window_id).is_some()
    }

    fn index_of(&self, id: ContainerId) -> Option<usize> {
        self.containers.iter().position(|c| c.id == id)
    }

    fn index_of_window(&self, window_id: WindowId) -> Option<usize> {
        self.containers.iter().position(|c| c.contains(window_id))
    }

    fn focused_index(&self) -> Option<usize> {
        self.focused_container_id.and_then(|id| self.index_of(id))
    }

    fn allocate_container(&mut self, frame: Rect) -> Container {
        let id = ContainerId(self.next_container_id);
        self.next_container_id += 1;
        Container::new(id, frame)
    }

    fn allocate_containers(&mut self, frames: &[Rect]) -> Vec<Container> {
        frames.iter().map(|&frame| self.allocate_container(frame)).collect()
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Adds a window to a container.
    ///
    /// Targets `to` when it names an existing container, then the focused
    /// container, then the first one. A container is synthesized when none
    /// exist. Windows that are already members anywhere are left in place.
    pub fn assign_window(&mut self, window_id: WindowId, to: Option<ContainerId>) {
        if self.contains_window(window_id) {
            return;
        }

        if self.containers.is_empty() {
            let container = self.allocate_container(Rect::zero());
            self.focused_container_id = Some(container.id);
            self.containers.push(container);
        }

        let index = to
            .and_then(|id| self.index_of(id))
            .or_else(|| self.focused_index())
            .unwrap_or(0);
        self.containers[index].add_window(window_id);

        if self.focused_container_id.is_none() {
            self.focused_container_id = Some(self.containers[index].id);
        }
    }

    /// Removes a window from whichever container holds it. Empty containers are kept.
    pub fn remove_window(&mut self, window_id: WindowId) {
        if let Some(index) = self.index_of_window(window_id) {
            self.containers[index].remove_window(window_id);
        }
    }

    /// Brings membership in line with `windows`.
    ///
    /// Members missing from `windows` are removed; windows not yet tracked are
    /// assigned in the given order.
    pub fn reconcile(&mut self, windows: &[WindowId]) {
        for id in self.window_ids() {
            if !windows.contains(&id) {
                self.remove_window(id);
            }
        }
        for &id in windows {
            self.assign_window(id, None);
        }
    }

    // ========================================================================
    // Layout Application
    // ========================================================================

    /// Applies a layout's container frames.
    ///
    /// The first application distributes windows round-robin, a different
    /// layout goes through [`Self::switch_layout`], and re-applying the active
    /// layout only refreshes container frames.
    pub fn apply_layout(
        &mut self,
        layout: LayoutId,
        container_frames: &[Rect],
        window_frames: Option<&HashMap<WindowId, Rect>>,
    ) {
        match self.active_layout {
            None => {
                self.redistribute_windows(container_frames);
                self.active_layout = Some(layout);
            }
            Some(active) if active != layout => {
                self.switch_layout(layout, container_frames, window_frames);
            }
            Some(_) => self.update_container_frames(container_frames),
        }
    }

    /// Updates container frames positionally when the count matches,
    /// otherwise redistributes windows into fresh containers.
    pub fn update_container_frames(&mut self, frames: &[Rect]) {
        if frames.len() == self.containers.len() {
            for (container, &frame) in self.containers.iter_mut().zip(frames) {
                container.frame = frame;
            }
        } else {
            self.redistribute_windows(frames);
        }
    }

    /// Replaces the containers and deals the windows out round-robin.
    pub fn redistribute_windows(&mut self, frames: &[Rect]) {
        let focused_window = self.focused_window_id();
        let previously_focused = self.container_focus_set();
        let windows = self.window_ids();

        let mut containers = self.allocate_containers(frames);
        let count = containers.len();
        if count > 0 {
            for (index, &window_id) in windows.iter().enumerate() {
                containers[index % count].add_window(window_id);
            }
        }
        self.install_containers(containers, focused_window, &previously_focused);
    }

    /// Switches to another layout, placing each window into the new container
    /// that best matches its current geometry.
    ///
    /// A container containing the window's center wins; otherwise the nearest
    /// container by center distance; windows without geometry go to the first
    /// container. Focus follows the previously focused window.
    pub fn switch_layout(
        &mut self,
        to: LayoutId,
        container_frames: &[Rect],
        window_frames: Option<&HashMap<WindowId, Rect>>,
    ) {
        if self.active_layout == Some(to) {
            return;
        }

        let focused_window = self.focused_window_id();
        let previously_focused = self.container_focus_set();
        let windows = self.window_ids();

        let mut containers = self.allocate_containers(container_frames);
        if !containers.is_empty() {
            for window_id in windows {
                let frame = window_frames.and_then(|frames| frames.get(&window_id));
                let index = frame.map_or(0, |frame| best_container_for(&containers, frame));
                containers[index].add_window(window_id);
            }
        }

        self.install_containers(containers, focused_window, &previously_focused);
        self.active_layout = Some(to);
    }

    fn container_focus_set(&self) -> WindowIdList {
        self.containers.iter().filter_map(Container::focused_window_id).collect()
    }

    fn install_containers(
        &mut self,
        mut containers: Vec<Container>,
        focused_window: Option<WindowId>,
        previously_focused: &[WindowId],
    ) {
        for container in &mut containers {
            if let Some(&id) = previously_focused.iter().find(|&&id| container.contains(id)) {
                container.focus_window(id);
            }
            if let Some(id) = focused_window {
                container.focus_window(id);
            }
        }

        self.focused_container_id = focused_window
            .and_then(|id| containers.iter().find(|c| c.contains(id)))
            .or_else(|| containers.iter().find(|c| !c.is_empty()))
            .or_else(|| containers.first())
            .map(|c| c.id);
        self.containers = containers;
    }

    // ========================================================================
    // Focus, Move and Cycle
    // ========================================================================

    /// Cycles focus inside the container owning `window_id`, or the focused
    /// container. Returns the newly focused window.
    pub fn cycle_window(
        &mut self,
        direction: Direction,
        window_id: Option<WindowId>,
    ) -> Option<WindowId> {
        let index = window_id
            .and_then(|id| self.index_of_window(id))
            .or_else(|| self.focused_index())?;

        let container = &mut self.containers[index];
        if let Some(anchor) = window_id {
            container.focus_window(anchor);
        }
        if direction.is_forward() {
            container.cycle_next();
        } else {
            container.cycle_previous();
        }
        let focused = container.focused_window_id();
        self.focused_container_id = Some(container.id);
        focused
    }

    /// Moves `from` into the neighbouring container in `direction`.
    ///
    /// Returns the destination container. When the source is left empty the
    /// destination becomes the focused container.
    pub fn move_window(&mut self, from: WindowId, direction: Direction) -> Option<ContainerId> {
        let source = self.index_of_window(from)?;
        let target = self.container_index_in_direction(source, direction)?;

        self.containers[source].remove_window(from);
        self.containers[target].add_window(from);
        self.containers[target].focus_window(from);

        let destination = self.containers[target].id;
        if self.containers[source].is_empty() {
            self.focused_container_id = Some(destination);
        }
        Some(destination)
    }

    /// Moves container focus in `direction`. Returns the newly focused container.
    pub fn set_focused_container(&mut self, direction: Direction) -> Option<ContainerId> {
        let current = self.focused_index()?;
        let target = self.container_index_in_direction(current, direction)?;
        let id = self.containers[target].id;
        self.focused_container_id = Some(id);
        Some(id)
    }

    /// Focuses the container owning `window_id` and the window inside it.
    ///
    /// Returns false when no container holds the window.
    pub fn update_focused_container(&mut self, window_id: WindowId) -> bool {
        let Some(index) = self.index_of_window(window_id) else {
            return false;
        };
        self.containers[index].focus_window(window_id);
        self.focused_container_id = Some(self.containers[index].id);
        true
    }

    fn container_index_in_direction(&self, from: usize, direction: Direction) -> Option<usize> {
        let len = self.containers.len();
        if len < 2 {
            return None;
        }
        match direction {
            Direction::Next => Some((from + 1) % len),
            Direction::Previous => Some((from + len - 1) % len),
            spatial => find_in_direction(&self.containers, from, spatial),
        }
    }
}

/// Index of the container whose frame best matches `frame`.
fn best_container_for(containers: &[Container], frame: &Rect) -> usize {
    let (cx, cy) = frame.center();
    if let Some(index) = containers.iter().position(|c| c.frame.contains_point(cx, cy)) {
        return index;
    }
    containers
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.frame.center_distance(frame).total_cmp(&b.frame.center_distance(frame))
        })
        .map_or(0, |(index, _)| index)
}

/// Finds the nearest container whose center lies in `direction` from `from`.
///
/// Distance is weighted against misalignment on the cross axis so a
/// container straight ahead beats a closer diagonal one.
fn find_in_direction(containers: &[Container], from: usize, direction: Direction) -> Option<usize> {
    let (from_x, from_y) = containers[from].frame.center();
    let mut best: Option<(usize, f64)> = None;

    for (index, container) in containers.iter().enumerate() {
        if index == from {
            continue;
        }
        let (x, y) = container.frame.center();
        let dx = x - from_x;
        let dy = y - from_y;

        let in_direction = match direction {
            Direction::Up => dy < 0.0,
            Direction::Down => dy > 0.0,
            Direction::Left => dx < 0.0,
            Direction::Right => dx > 0.0,
            Direction::Next | Direction::Previous => false,
        };
        if !in_direction {
            continue;
        }

        let penalty = if matches!(direction, Direction::Up | Direction::Down) {
            dx.abs() * 2.0
        } else {
            dy.abs() * 2.0
        };
        let weighted = penalty.mul_add(penalty, dx.mul_add(dx, dy * dy));

        if best.is_none_or(|(_, distance)| weighted < distance) {
            best = Some((index, weighted));
        }
    }

    best.map(|(index, _)| index)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const LEFT: Rect = Rect::new(0.0, 0.0, 960.0, 1080.0);
    const RIGHT: Rect = Rect::new(960.0, 0.0, 960.0, 1080.0);
    const FULL: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    fn w(id: u32) -> WindowId { WindowId(id) }

    fn state_with(layout: LayoutId, frames: &[Rect], windows: &[u32]) -> MonitorTilingState {
        let mut state = MonitorTilingState::new(MonitorId(1));
        for &id in windows {
            state.assign_window(w(id), None);
        }
        state.apply_layout(layout, frames, None);
        state
    }

    fn assert_invariants(state: &MonitorTilingState) {
        for container in state.containers() {
            assert!(container.is_consistent(), "container {} broke focus invariant", container.id);
        }
        if !state.containers().is_empty() {
            assert!(state.focused_container().is_some());
        }
    }

    mod membership_tests {
        use super::*;

        #[test]
        fn test_assign_synthesizes_container() {
            let mut state = MonitorTilingState::new(MonitorId(1));
            state.assign_window(w(1), None);

            assert_eq!(state.containers().len(), 1);
            assert_eq!(state.containers()[0].frame, Rect::zero());
            assert_eq!(state.focused_window_id(), Some(w(1)));
            assert_invariants(&state);
        }

        #[test]
        fn test_assign_targets_explicit_then_focused() {
            let mut state = state_with(LayoutId::Columns2, &[LEFT, RIGHT], &[]);
            let right = state.containers()[1].id;

            state.assign_window(w(1), Some(right));
            assert!(state.container(right).unwrap().contains(w(1)));

            state.assign_window(w(2), Some(ContainerId(999)));
            let focused = state.focused_container().unwrap();
            assert!(focused.contains(w(2)));
        }

        #[test]
        fn test_assign_does_not_duplicate() {
            let mut state = state_with(LayoutId::Columns2, &[LEFT, RIGHT], &[1, 2]);
            let right = state.containers()[1].id;
            state.assign_window(w(1), Some(right));

            assert_eq!(state.window_ids().iter().filter(|&&id| id == w(1)).count(), 1);
        }

        #[test]
        fn test_remove_keeps_empty_containers() {
            let mut state = state_with(LayoutId::Columns2, &[LEFT, RIGHT], &[1, 2]);
            state.remove_window(w(2));

            assert_eq!(state.containers().len(), 2);
            assert!(state.containers()[1].is_empty());
            assert_invariants(&state);
        }

        #[test]
        fn test_reconcile_drops_and_adds() {
            let mut state = state_with(LayoutId::Monocle, &[FULL], &[1, 2, 3]);
            state.reconcile(&[w(1), w(3), w(4)]);

            assert_eq!(state.window_ids().as_slice(), &[w(1), w(3), w(4)]);
        }
    }

    mod layout_tests {
        use super::*;

        #[test]
        fn test_first_application_round_robins() {
            let state = state_with(LayoutId::Columns2, &[LEFT, RIGHT], &[1, 2, 3]);

            assert_eq!(state.active_layout(), Some(LayoutId::Columns2));
            assert_eq!(state.containers()[0].window_ids(), &[w(1), w(3)]);
            assert_eq!(state.containers()[1].window_ids(), &[w(2)]);
            assert_invariants(&state);
        }

        #[test]
        fn test_redistribute_deals_round_robin_and_keeps_focus() {
            let mut state = state_with(LayoutId::Monocle, &[FULL], &[1, 2, 3, 4]);
            assert!(state.update_focused_container(w(4)));

            state.redistribute_windows(&[LEFT, RIGHT]);

            assert_eq!(state.containers()[0].window_ids(), &[w(1), w(3)]);
            assert_eq!(state.containers()[1].window_ids(), &[w(2), w(4)]);
            assert_eq!(state.focused_window_id(), Some(w(4)));
            assert_eq!(state.focused_container().map(|c| c.id), Some(state.containers()[1].id));
            assert_invariants(&state);
        }

        #[test]
        fn test_update_frames_preserves_identity() {
            let mut state = state_with(LayoutId::Columns2, &[LEFT, RIGHT], &[1, 2]);
            let ids: Vec<_> = state.containers().iter().map(|c| c.id).collect();

            let shifted = [Rect::new(8.0, 8.0, 944.0, 1064.0), Rect::new(968.0, 8.0, 944.0, 1064.0)];
            state.update_container_frames(&shifted);

            let after: Vec<_> = state.containers().iter().map(|c| c.id).collect();
            assert_eq!(ids, after);
            assert_eq!(state.containers()[0].frame, shifted[0]);
        }

        #[test]
        fn test_container_ids_never_reused() {
            let mut state = state_with(LayoutId::Columns2, &[LEFT, RIGHT], &[1]);
            let before: Vec<_> = state.containers().iter().map(|c| c.id).collect();
            state.switch_layout(LayoutId::Monocle, &[FULL], None);
            state.switch_layout(LayoutId::Columns2, &[LEFT, RIGHT], None);

            for container in state.containers() {
                assert!(!before.contains(&container.id));
            }
        }

        #[test]
        fn test_switch_is_noop_for_same_layout() {
            let mut state = state_with(LayoutId::Columns2, &[LEFT, RIGHT], &[1, 2]);
            let ids: Vec<_> = state.containers().iter().map(|c| c.id).collect();
            state.switch_layout(LayoutId::Columns2, &[FULL], None);

            let after: Vec<_> = state.containers().iter().map(|c| c.id).collect();
            assert_eq!(ids, after);
        }

        #[test]
        fn test_switch_assigns_by_center_then_nearest() {
            let mut state = state_with(LayoutId::Monocle, &[FULL], &[1, 2, 3]);
            let mut frames = HashMap::new();
            frames.insert(w(1), Rect::new(1000.0, 100.0, 400.0, 400.0));
            frames.insert(w(2), Rect::new(100.0, 100.0, 400.0, 400.0));
            frames.insert(w(3), Rect::new(3000.0, 100.0, 400.0, 400.0));

            state.switch_layout(LayoutId::Columns2, &[LEFT, RIGHT], Some(&frames));

            assert_eq!(state.containers()[0].window_ids(), &[w(2)]);
            assert_eq!(state.containers()[1].window_ids(), &[w(1), w(3)]);
        }

        #[test]
        fn test_switch_without_geometry_uses_first_container() {
            let mut state = state_with(LayoutId::Monocle, &[FULL], &[1, 2]);
            state.switch_layout(LayoutId::Columns2, &[LEFT, RIGHT], None);

            assert_eq!(state.containers()[0].window_ids(), &[w(1), w(2)]);
            assert!(state.containers()[1].is_empty());
        }

        #[test]
        fn test_switch_preserves_focus_by_identity() {
            let layouts: [(LayoutId, Vec<Rect>); 3] = [
                (LayoutId::Monocle, vec![FULL]),
                (LayoutId::Columns2, vec![LEFT, RIGHT]),
                (
                    LayoutId::Grid2x2,
                    vec![
                        Rect::new(0.0, 0.0, 960.0, 540.0),
                        Rect::new(960.0, 0.0, 960.0, 540.0),
                        Rect::new(0.0, 540.0, 960.0, 540.0),
                        Rect::new(960.0, 540.0, 960.0, 540.0),
                    ],
                ),
            ];
            let mut frames = HashMap::new();
            for id in 1..=5u32 {
                frames.insert(w(id), Rect::new(f64::from(id) * 300.0, f64::from(id) * 150.0, 200.0, 200.0));
            }

            for (a, a_frames) in &layouts {
                for (b, b_frames) in &layouts {
                    if a == b {
                        continue;
                    }
                    for focus in 1..=5u32 {
                        let mut state = state_with(*a, a_frames, &[1, 2, 3, 4, 5]);
                        assert!(state.update_focused_container(w(focus)));

                        state.switch_layout(*b, b_frames, Some(&frames));
                        state.switch_layout(*a, a_frames, Some(&frames));

                        assert_eq!(state.focused_window_id(), Some(w(focus)), "{a} -> {b} -> {a}");
                        assert_invariants(&state);
                    }
                }
            }
        }

        #[test]
        fn test_switch_focuses_first_non_empty_when_focus_lost() {
            let mut state = MonitorTilingState::new(MonitorId(1));
            state.apply_layout(LayoutId::Monocle, &[FULL], None);
            state.switch_layout(LayoutId::Columns2, &[LEFT, RIGHT], None);

            assert_eq!(state.focused_container_id(), Some(state.containers()[0].id));
        }
    }

    mod navigation_tests {
        use super::*;

        #[test]
        fn test_cycle_window_in_anchor_container() {
            let mut state = state_with(LayoutId::Monocle, &[FULL], &[1, 2, 3]);
            assert_eq!(state.cycle_window(Direction::Next, Some(w(1))), Some(w(2)));
            assert_eq!(state.cycle_window(Direction::Previous, None), Some(w(1)));
            assert_eq!(state.cycle_window(Direction::Previous, None), Some(w(3)));
        }

        #[test]
        fn test_move_window_refocuses_destination_when_source_empties() {
            let mut state = state_with(LayoutId::Columns2, &[LEFT, RIGHT], &[1, 2]);
            let left = state.containers()[0].id;
            let right = state.containers()[1].id;
            assert_eq!(state.focused_container_id(), Some(left));

            assert_eq!(state.move_window(w(1), Direction::Right), Some(right));
            assert_eq!(state.focused_container_id(), Some(right));
            assert_eq!(state.container(right).unwrap().focused_window_id(), Some(w(1)));
            assert_invariants(&state);
        }

        #[test]
        fn test_move_window_keeps_focus_when_source_not_empty() {
            let mut state = state_with(LayoutId::Columns2, &[LEFT, RIGHT], &[1, 2, 3]);
            let left = state.containers()[0].id;

            state.move_window(w(1), Direction::Right);
            assert_eq!(state.focused_container_id(), Some(left));
            assert_eq!(state.focused_window_id(), Some(w(3)));
        }

        #[test]
        fn test_move_window_without_neighbour_is_noop() {
            let mut state = state_with(LayoutId::Columns2, &[LEFT, RIGHT], &[1, 2]);
            assert_eq!(state.move_window(w(1), Direction::Left), None);
            assert_eq!(state.move_window(w(1), Direction::Up), None);
            assert!(state.containers()[0].contains(w(1)));
        }

        #[test]
        fn test_set_focused_container_spatial_and_ring() {
            let frames = [
                Rect::new(0.0, 0.0, 960.0, 540.0),
                Rect::new(960.0, 0.0, 960.0, 540.0),
                Rect::new(0.0, 540.0, 960.0, 540.0),
                Rect::new(960.0, 540.0, 960.0, 540.0),
            ];
            let mut state = state_with(LayoutId::Grid2x2, &frames, &[1, 2, 3, 4]);
            let ids: Vec<_> = state.containers().iter().map(|c| c.id).collect();

            assert_eq!(state.set_focused_container(Direction::Down), Some(ids[2]));
            assert_eq!(state.set_focused_container(Direction::Right), Some(ids[3]));
            assert_eq!(state.set_focused_container(Direction::Down), None);
            assert_eq!(state.set_focused_container(Direction::Next), Some(ids[0]));
            assert_eq!(state.set_focused_container(Direction::Previous), Some(ids[3]));
        }

        #[test]
        fn test_update_focused_container() {
            let mut state = state_with(LayoutId::Columns2, &[LEFT, RIGHT], &[1, 2, 3, 4]);
            assert!(state.update_focused_container(w(4)));
            assert_eq!(state.focused_window_id(), Some(w(4)));
            assert!(!state.update_focused_container(w(42)));
        }
    }
}
