//! Leader-key configuration types.

use std::collections::BTreeMap;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One configured leader binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaderBinding {
    /// Key chord pressed while leader mode is active, e.g. "h" or "Shift+H".
    /// Space-separated chords form a sequence.
    pub keys: String,

    /// Overrides whether the action keeps leader mode active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stays_in_leader: Option<bool>,

    /// Name of the sub-layer this binding belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_layer: Option<String>,
}

impl LeaderBinding {
    #[must_use]
    pub fn new(keys: impl Into<String>) -> Self {
        Self { keys: keys.into(), ..Self::default() }
    }

    /// Whether the binding is a single chord on the leader layer itself.
    #[must_use]
    pub fn is_leader_layer(&self) -> bool {
        self.sub_layer.is_none() && self.keys.split_whitespace().count() == 1
    }
}

/// Leader mode settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaderConfig {
    /// Whether leader mode is available.
    /// Default: true
    pub enabled: bool,

    /// Shortcut that enters and leaves leader mode.
    /// Default: "Control+Space"
    pub trigger: String,

    /// Idle time before leader mode exits on its own, in milliseconds.
    /// 0 disables the timeout.
    /// Default: 2000
    pub timeout_ms: u64,

    /// Action id to binding, e.g. "focus.left" to { "keys": "h" }.
    pub bindings: BTreeMap<String, LeaderBinding>,
}

impl Default for LeaderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trigger: "Control+Space".to_string(),
            timeout_ms: 2000,
            bindings: default_bindings(),
        }
    }
}

impl LeaderConfig {
    /// The timeout, or `None` when leader mode never exits on its own.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms == 0 { None } else { Some(Duration::from_millis(self.timeout_ms)) }
    }
}

fn default_bindings() -> BTreeMap<String, LeaderBinding> {
    [
        ("layout.monocle", "m"),
        ("layout.columns-2", "2"),
        ("layout.columns-3", "3"),
        ("layout.rows-2", "r"),
        ("layout.grid-2x2", "g"),
        ("focus.left", "h"),
        ("focus.down", "j"),
        ("focus.up", "k"),
        ("focus.right", "l"),
        ("move.left", "Shift+H"),
        ("move.down", "Shift+J"),
        ("move.up", "Shift+K"),
        ("move.right", "Shift+L"),
        ("cycle.next", "n"),
        ("cycle.previous", "p"),
        ("retile", "t"),
        ("exit", "Escape"),
    ]
    .into_iter()
    .map(|(action, keys)| (action.to_string(), LeaderBinding::new(keys)))
    .collect()
}
