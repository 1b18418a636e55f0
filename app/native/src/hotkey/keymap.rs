//! Key name tables and binding compilation.
//!
//! Key and modifier names resolve to macOS virtual key codes and event flag
//! masks through plain lookup tables. [`compile_bindings`] turns the
//! `leader` configuration section into the [`Keymap`] consulted by the
//! leader state machine.

use std::collections::HashMap;
use std::fmt;

use super::action::KeyAction;
use crate::config::LeaderConfig;

/// Platform virtual key code.
pub type KeyCode = u16;

// ============================================================================
// Modifiers
// ============================================================================

/// Modifier flags, using the window server's event flag bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u64);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(0x0002_0000);
    pub const CONTROL: Self = Self(0x0004_0000);
    pub const OPTION: Self = Self(0x0008_0000);
    pub const COMMAND: Self = Self(0x0010_0000);

    /// Bits that take part in chord matching. Caps lock, fn and the
    /// device-dependent bits are dropped.
    const RELEVANT: u64 = Self::SHIFT.0 | Self::CONTROL.0 | Self::OPTION.0 | Self::COMMAND.0;

    /// Keeps only the modifier bits relevant to chord matching.
    #[must_use]
    pub const fn from_flags(flags: u64) -> Self { Self(flags & Self::RELEVANT) }

    #[must_use]
    pub const fn bits(self) -> u64 { self.0 }

    #[must_use]
    pub const fn union(self, other: Self) -> Self { Self(self.0 | other.0) }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool { self.0 & other.0 == other.0 }

    #[must_use]
    pub const fn is_empty(self) -> bool { self.0 == 0 }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::CONTROL, "Control"),
            (Self::OPTION, "Option"),
            (Self::SHIFT, "Shift"),
            (Self::COMMAND, "Command"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Lookup Tables
// ============================================================================

/// Normalizes a modifier name to its canonical spelling.
///
/// - "Ctrl" is normalized to "Control"
/// - "Cmd", "Super" and "Meta" are normalized to "Command"
/// - "Alt" and "Opt" are normalized to "Option"
fn normalize_modifier(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    match lower.as_str() {
        "ctrl" => "control".to_string(),
        "cmd" | "super" | "meta" => "command".to_string(),
        "alt" | "opt" => "option".to_string(),
        _ => lower,
    }
}

/// Looks up a modifier mask by name. Case-insensitive, aliases accepted.
#[must_use]
pub fn modifier_mask(name: &str) -> Option<Modifiers> {
    match normalize_modifier(name).as_str() {
        "shift" => Some(Modifiers::SHIFT),
        "control" => Some(Modifiers::CONTROL),
        "option" => Some(Modifiers::OPTION),
        "command" => Some(Modifiers::COMMAND),
        _ => None,
    }
}

/// Looks up a virtual key code by name. Case-insensitive.
#[must_use]
pub fn key_code(name: &str) -> Option<KeyCode> {
    let code = match name.to_ascii_lowercase().as_str() {
        "a" => 0x00,
        "s" => 0x01,
        "d" => 0x02,
        "f" => 0x03,
        "h" => 0x04,
        "g" => 0x05,
        "z" => 0x06,
        "x" => 0x07,
        "c" => 0x08,
        "v" => 0x09,
        "b" => 0x0B,
        "q" => 0x0C,
        "w" => 0x0D,
        "e" => 0x0E,
        "r" => 0x0F,
        "y" => 0x10,
        "t" => 0x11,
        "1" => 0x12,
        "2" => 0x13,
        "3" => 0x14,
        "4" => 0x15,
        "6" => 0x16,
        "5" => 0x17,
        "=" | "equal" => 0x18,
        "9" => 0x19,
        "7" => 0x1A,
        "-" | "minus" => 0x1B,
        "8" => 0x1C,
        "0" => 0x1D,
        "]" | "bracketright" => 0x1E,
        "o" => 0x1F,
        "u" => 0x20,
        "[" | "bracketleft" => 0x21,
        "i" => 0x22,
        "p" => 0x23,
        "return" | "enter" => 0x24,
        "l" => 0x25,
        "j" => 0x26,
        "'" | "quote" => 0x27,
        "k" => 0x28,
        ";" | "semicolon" => 0x29,
        "\\" | "backslash" => 0x2A,
        "," | "comma" => 0x2B,
        "/" | "slash" => 0x2C,
        "n" => 0x2D,
        "m" => 0x2E,
        "." | "period" => 0x2F,
        "tab" => 0x30,
        "space" => 0x31,
        "`" | "backquote" => 0x32,
        "delete" | "backspace" => 0x33,
        "escape" | "esc" => 0x35,
        "f5" => 0x60,
        "f6" => 0x61,
        "f7" => 0x62,
        "f3" => 0x63,
        "f8" => 0x64,
        "f9" => 0x65,
        "f11" => 0x67,
        "f10" => 0x6D,
        "f12" => 0x6F,
        "home" => 0x73,
        "pageup" => 0x74,
        "forwarddelete" => 0x75,
        "f4" => 0x76,
        "end" => 0x77,
        "f2" => 0x78,
        "pagedown" => 0x79,
        "f1" => 0x7A,
        "left" => 0x7B,
        "right" => 0x7C,
        "down" => 0x7D,
        "up" => 0x7E,
        _ => return None,
    };
    Some(code)
}

// ============================================================================
// Chords
// ============================================================================

/// Errors from parsing key chords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeymapError {
    #[error("empty key chord")]
    Empty,

    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
}

/// A key together with the exact modifier set it requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyChord {
    #[must_use]
    pub const fn new(key: KeyCode, modifiers: Modifiers) -> Self { Self { key, modifiers } }

    /// Parses `"Control+Space"`, `"Shift+H"`, `"h"`.
    ///
    /// The last `+`-separated part is the key, everything before it a
    /// modifier. The plus key itself cannot be bound.
    ///
    /// # Errors
    ///
    /// Returns a [`KeymapError`] naming the part that failed to resolve.
    pub fn parse(chord: &str) -> Result<Self, KeymapError> {
        let chord = chord.trim();
        if chord.is_empty() {
            return Err(KeymapError::Empty);
        }

        let mut parts: Vec<&str> = chord.split('+').map(str::trim).collect();
        let key_name = parts.pop().filter(|k| !k.is_empty()).ok_or(KeymapError::Empty)?;
        let key = key_code(key_name).ok_or_else(|| KeymapError::UnknownKey(key_name.to_string()))?;

        let modifiers = parts.into_iter().try_fold(Modifiers::NONE, |acc, name| {
            modifier_mask(name)
                .map(|mask| acc.union(mask))
                .ok_or_else(|| KeymapError::UnknownModifier(name.to_string()))
        })?;

        Ok(Self { key, modifiers })
    }
}

// ============================================================================
// Keymap
// ============================================================================

/// A compiled leader-layer binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledBinding {
    /// Configuration action id, e.g. `focus.left`.
    pub id: String,
    /// Key chord as written in the configuration.
    pub keys: String,
    pub action: KeyAction,
    pub stays_in_leader: bool,
}

/// Lookup table consulted by the leader state machine.
#[derive(Clone, Debug)]
pub struct Keymap {
    enabled: bool,
    trigger: KeyChord,
    bindings: HashMap<KeyChord, CompiledBinding>,
}

impl Keymap {
    /// A keymap with only a trigger.
    #[must_use]
    pub fn new(trigger: KeyChord) -> Self {
        Self { enabled: true, trigger, bindings: HashMap::new() }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool { self.enabled }

    #[must_use]
    pub const fn trigger(&self) -> KeyChord { self.trigger }

    #[must_use]
    pub fn lookup(&self, chord: &KeyChord) -> Option<&CompiledBinding> { self.bindings.get(chord) }

    #[must_use]
    pub fn len(&self) -> usize { self.bindings.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.bindings.is_empty() }

    /// Adds a binding. An existing binding for the same chord is kept.
    pub fn bind(&mut self, chord: KeyChord, binding: CompiledBinding) -> bool {
        if self.bindings.contains_key(&chord) {
            return false;
        }
        self.bindings.insert(chord, binding);
        true
    }

    /// All bindings, sorted by action id.
    #[must_use]
    pub fn bindings(&self) -> Vec<(KeyChord, &CompiledBinding)> {
        let mut list: Vec<_> = self.bindings.iter().map(|(chord, b)| (*chord, b)).collect();
        list.sort_by(|a, b| a.1.id.cmp(&b.1.id));
        list
    }
}

/// Compiles the leader configuration into a [`Keymap`].
///
/// Only single-chord bindings outside any sub-layer are compiled. Bindings
/// with an unknown action id or an unparsable chord are skipped with a
/// warning. When two bindings share a chord, the one whose id sorts first
/// wins.
///
/// # Errors
///
/// Returns an error when the trigger itself cannot be parsed.
pub fn compile_bindings(config: &LeaderConfig) -> Result<Keymap, KeymapError> {
    let mut keymap = Keymap::new(KeyChord::parse(&config.trigger)?);
    keymap.enabled = config.enabled;

    for (id, binding) in &config.bindings {
        if !binding.is_leader_layer() {
            tracing::debug!(action = %id, keys = %binding.keys, "skipping non leader-layer binding");
            continue;
        }

        let Some(action) = KeyAction::from_id(id) else {
            tracing::warn!(action = %id, "unknown leader action");
            continue;
        };

        let chord = match KeyChord::parse(&binding.keys) {
            Ok(chord) => chord,
            Err(err) => {
                tracing::warn!(action = %id, keys = %binding.keys, error = %err, "invalid leader binding");
                continue;
            }
        };

        if chord == keymap.trigger {
            tracing::warn!(action = %id, keys = %binding.keys, "binding shadows the leader trigger");
            continue;
        }

        let compiled = CompiledBinding {
            id: id.clone(),
            keys: binding.keys.clone(),
            action,
            stays_in_leader: binding.stays_in_leader.unwrap_or_else(|| action.stays_in_leader()),
        };
        if !keymap.bind(chord, compiled) {
            tracing::warn!(action = %id, keys = %binding.keys, "duplicate leader binding ignored");
        }
    }

    Ok(keymap)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeaderBinding;
    use crate::tiling::state::{Direction, LayoutId};

    mod table_tests {
        use super::*;

        #[test]
        fn test_key_codes() {
            assert_eq!(key_code("a"), Some(0x00));
            assert_eq!(key_code("H"), Some(0x04));
            assert_eq!(key_code("Space"), Some(0x31));
            assert_eq!(key_code("escape"), Some(0x35));
            assert_eq!(key_code("`"), key_code("Backquote"));
            assert_eq!(key_code("F13"), None);
        }

        #[test]
        fn test_every_letter_and_digit_resolves() {
            for c in ('a'..='z').chain('0'..='9') {
                assert!(key_code(&c.to_string()).is_some(), "missing {c}");
            }
        }

        #[test]
        fn test_modifier_aliases() {
            assert_eq!(modifier_mask("Ctrl"), Some(Modifiers::CONTROL));
            assert_eq!(modifier_mask("control"), Some(Modifiers::CONTROL));
            assert_eq!(modifier_mask("Cmd"), Some(Modifiers::COMMAND));
            assert_eq!(modifier_mask("Super"), Some(Modifiers::COMMAND));
            assert_eq!(modifier_mask("Alt"), Some(Modifiers::OPTION));
            assert_eq!(modifier_mask("Opt"), Some(Modifiers::OPTION));
            assert_eq!(modifier_mask("Hyper"), None);
        }

        #[test]
        fn test_from_flags_drops_irrelevant_bits() {
            let caps_lock = 0x0001_0000;
            let device_bits = 0x0000_0100;
            let flags = Modifiers::CONTROL.bits() | caps_lock | device_bits;
            assert_eq!(Modifiers::from_flags(flags), Modifiers::CONTROL);
        }

        #[test]
        fn test_modifiers_display() {
            let mods = Modifiers::SHIFT.union(Modifiers::CONTROL);
            assert_eq!(mods.to_string(), "Control+Shift");
            assert_eq!(Modifiers::NONE.to_string(), "");
        }
    }

    mod chord_tests {
        use super::*;

        #[test]
        fn test_parse_chords() {
            assert_eq!(
                KeyChord::parse("Control+Space"),
                Ok(KeyChord::new(0x31, Modifiers::CONTROL))
            );
            assert_eq!(KeyChord::parse("Shift+H"), Ok(KeyChord::new(0x04, Modifiers::SHIFT)));
            assert_eq!(KeyChord::parse(" h "), Ok(KeyChord::new(0x04, Modifiers::NONE)));
            assert_eq!(
                KeyChord::parse("Cmd+Alt+Left"),
                Ok(KeyChord::new(0x7B, Modifiers::COMMAND.union(Modifiers::OPTION)))
            );
        }

        #[test]
        fn test_parse_errors() {
            assert_eq!(KeyChord::parse(""), Err(KeymapError::Empty));
            assert_eq!(KeyChord::parse("Control+"), Err(KeymapError::Empty));
            assert_eq!(KeyChord::parse("Control+Banana"), Err(KeymapError::UnknownKey("Banana".into())));
            assert_eq!(KeyChord::parse("Hyper+h"), Err(KeymapError::UnknownModifier("Hyper".into())));
        }
    }

    mod compile_tests {
        use super::*;

        #[test]
        fn test_default_config_compiles_every_binding() {
            let config = LeaderConfig::default();
            let keymap = compile_bindings(&config).unwrap();

            assert_eq!(keymap.len(), config.bindings.len());
            assert_eq!(keymap.trigger(), KeyChord::new(0x31, Modifiers::CONTROL));

            let h = keymap.lookup(&KeyChord::new(0x04, Modifiers::NONE)).unwrap();
            assert_eq!(h.action, KeyAction::FocusContainer(Direction::Left));
            assert!(h.stays_in_leader);

            let shift_h = keymap.lookup(&KeyChord::new(0x04, Modifiers::SHIFT)).unwrap();
            assert_eq!(shift_h.action, KeyAction::MoveWindow(Direction::Left));

            let g = keymap.lookup(&KeyChord::new(0x05, Modifiers::NONE)).unwrap();
            assert_eq!(g.action, KeyAction::SwitchLayout(LayoutId::Grid2x2));
            assert!(!g.stays_in_leader);
        }

        #[test]
        fn test_invalid_bindings_are_skipped() {
            let mut config = LeaderConfig::default();
            config.bindings.clear();
            config.bindings.insert("focus.left".into(), LeaderBinding::new("h"));
            config.bindings.insert("focus.sideways".into(), LeaderBinding::new("s"));
            config.bindings.insert("focus.right".into(), LeaderBinding::new("Banana"));
            config.bindings.insert("retile".into(), LeaderBinding::new("Control+Space"));

            let keymap = compile_bindings(&config).unwrap();
            assert_eq!(keymap.len(), 1);
        }

        #[test]
        fn test_sub_layer_and_sequences_are_not_compiled() {
            let mut config = LeaderConfig::default();
            config.bindings.clear();
            config.bindings.insert(
                "focus.left".into(),
                LeaderBinding { sub_layer: Some("window".into()), ..LeaderBinding::new("h") },
            );
            config.bindings.insert("focus.right".into(), LeaderBinding::new("w l"));

            assert!(compile_bindings(&config).unwrap().is_empty());
        }

        #[test]
        fn test_stays_in_leader_override() {
            let mut config = LeaderConfig::default();
            config.bindings.clear();
            config.bindings.insert(
                "layout.monocle".into(),
                LeaderBinding { stays_in_leader: Some(true), ..LeaderBinding::new("m") },
            );

            let keymap = compile_bindings(&config).unwrap();
            assert!(keymap.lookup(&KeyChord::new(0x2E, Modifiers::NONE)).unwrap().stays_in_leader);
        }

        #[test]
        fn test_duplicate_chord_keeps_first_id() {
            let mut config = LeaderConfig::default();
            config.bindings.clear();
            config.bindings.insert("cycle.next".into(), LeaderBinding::new("n"));
            config.bindings.insert("retile".into(), LeaderBinding::new("n"));

            let keymap = compile_bindings(&config).unwrap();
            assert_eq!(keymap.len(), 1);
            assert_eq!(keymap.bindings()[0].1.id, "cycle.next");
        }

        #[test]
        fn test_invalid_trigger_is_an_error() {
            let config = LeaderConfig { trigger: "Control+Nope".into(), ..LeaderConfig::default() };
            assert!(compile_bindings(&config).is_err());
        }
    }
}
