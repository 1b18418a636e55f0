//! Actions dispatched from leader mode.

use std::fmt;

use crate::tiling::state::{Direction, LayoutId};

/// A tiling command produced by a leader binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Switch the focused monitor to a layout.
    SwitchLayout(LayoutId),
    /// Send the focused window to the neighbouring container.
    MoveWindow(Direction),
    /// Focus the neighbouring container.
    FocusContainer(Direction),
    /// Cycle focus within the focused container.
    CycleWindow(Direction),
    /// Run a tiling pass now.
    Retile,
    /// Leave leader mode.
    ExitLeader,
}

impl KeyAction {
    /// Whether dispatching the action keeps leader mode active.
    ///
    /// Navigation is usually repeated, so it stays; everything else leaves.
    #[must_use]
    pub const fn stays_in_leader(&self) -> bool {
        matches!(self, Self::MoveWindow(_) | Self::FocusContainer(_) | Self::CycleWindow(_))
    }

    /// Parses a configuration action id such as `focus.left` or `layout.rows-2`.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "retile" => return Some(Self::Retile),
            "exit" => return Some(Self::ExitLeader),
            _ => {}
        }

        let (group, arg) = id.split_once('.')?;
        match group {
            "layout" => arg.parse().ok().map(Self::SwitchLayout),
            "move" => arg.parse().ok().map(Self::MoveWindow),
            "focus" => arg.parse().ok().map(Self::FocusContainer),
            "cycle" => arg.parse().ok().map(Self::CycleWindow),
            _ => None,
        }
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SwitchLayout(layout) => write!(f, "layout.{layout}"),
            Self::MoveWindow(direction) => write!(f, "move.{direction}"),
            Self::FocusContainer(direction) => write!(f, "focus.{direction}"),
            Self::CycleWindow(direction) => write!(f, "cycle.{direction}"),
            Self::Retile => f.write_str("retile"),
            Self::ExitLeader => f.write_str("exit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id() {
        assert_eq!(KeyAction::from_id("layout.columns-2"), Some(KeyAction::SwitchLayout(LayoutId::Columns2)));
        assert_eq!(KeyAction::from_id("focus.left"), Some(KeyAction::FocusContainer(Direction::Left)));
        assert_eq!(KeyAction::from_id("move.next"), Some(KeyAction::MoveWindow(Direction::Next)));
        assert_eq!(KeyAction::from_id("cycle.prev"), Some(KeyAction::CycleWindow(Direction::Previous)));
        assert_eq!(KeyAction::from_id("retile"), Some(KeyAction::Retile));
        assert_eq!(KeyAction::from_id("exit"), Some(KeyAction::ExitLeader));

        assert_eq!(KeyAction::from_id("layout.spiral"), None);
        assert_eq!(KeyAction::from_id("resize.left"), None);
        assert_eq!(KeyAction::from_id("focus"), None);
    }

    #[test]
    fn test_display_round_trips_through_from_id() {
        for action in [
            KeyAction::SwitchLayout(LayoutId::Grid2x2),
            KeyAction::MoveWindow(Direction::Up),
            KeyAction::CycleWindow(Direction::Next),
            KeyAction::Retile,
        ] {
            assert_eq!(KeyAction::from_id(&action.to_string()), Some(action));
        }
    }

    #[test]
    fn test_stays_in_leader() {
        assert!(KeyAction::FocusContainer(Direction::Left).stays_in_leader());
        assert!(KeyAction::CycleWindow(Direction::Next).stays_in_leader());
        assert!(!KeyAction::SwitchLayout(LayoutId::Monocle).stays_in_leader());
        assert!(!KeyAction::Retile.stays_in_leader());
        assert!(!KeyAction::ExitLeader.stays_in_leader());
    }
}
