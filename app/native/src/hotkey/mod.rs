//! Leader-key input handling.
//!
//! A single configured trigger chord enters leader mode; while active,
//! plain chords map to tiling actions. Key events come from whatever
//! platform event tap the host installs and are fed to
//! [`LeaderKeyMachine::handle_key_event`]; resolved [`KeyAction`]s come out
//! of an mpsc channel that the tiling manager drains.

pub mod action;
pub mod keymap;
pub mod leader;

pub use action::KeyAction;
pub use keymap::{
    CompiledBinding, KeyChord, KeyCode, Keymap, KeymapError, Modifiers, compile_bindings, key_code,
    modifier_mask,
};
pub use leader::{ACTION_CHANNEL_CAPACITY, LeaderKeyMachine, LeaderState};
