// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Keyboard shortcut bindings.
//!
//! A shortcut maps a normalized key chord (such as `Ctrl+Shift+T`) to a
//! command line that is handed to the dispatcher when the chord is pressed.
//! The table is seeded from [`defaults::DEFAULT_SHORTCUTS`] and overlaid with
//! the bindings persisted in the settings file.
//!
//! Removing a binding leaves a tombstone (an empty command line) rather than
//! deleting the entry, so that a removed default is not silently re-seeded
//! on the next start.

mod defaults;

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

pub(crate) use defaults::DEFAULT_SHORTCUTS;

/// A command line bound to a chord, with a human readable description.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    pub command: String,
    pub description: String,
}

impl Binding {
    pub(crate) fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }

    pub(crate) fn removed() -> Self {
        Self::default()
    }

    pub(crate) fn is_removed(&self) -> bool {
        self.command.is_empty()
    }
}

pub(crate) struct ShortcutTable {
    bindings: HashMap<String, Binding>,
}

impl ShortcutTable {
    pub(crate) fn with_defaults() -> Self {
        Self {
            bindings: DEFAULT_SHORTCUTS.clone(),
        }
    }

    /// Builds the table from the defaults overlaid with persisted overrides.
    pub(crate) fn from_overrides(overrides: &BTreeMap<String, Binding>) -> Self {
        let mut table = Self::with_defaults();
        table.apply_overrides(overrides);
        table
    }

    /// Inserts or overwrites the binding for `chord`.
    pub(crate) fn bind(&mut self, chord: &str, command: &str, description: &str) {
        self.bindings
            .insert(chord.to_string(), Binding::new(command, description));
    }

    /// Marks `chord` as removed. Returns `false` if nothing was bound to it.
    pub(crate) fn unbind(&mut self, chord: &str) -> bool {
        if self.lookup(chord).is_none() {
            return false;
        }
        self.bindings.insert(chord.to_string(), Binding::removed());
        true
    }

    /// Replaces every binding with the built-in defaults, dropping tombstones.
    pub(crate) fn reset_to_defaults(&mut self) {
        self.bindings = DEFAULT_SHORTCUTS.clone();
    }

    /// The active binding for `chord`, `None` if never bound or removed.
    pub(crate) fn lookup(&self, chord: &str) -> Option<&Binding> {
        self.bindings.get(chord).filter(|binding| !binding.is_removed())
    }

    pub(crate) fn is_removed(&self, chord: &str) -> bool {
        self.bindings
            .get(chord)
            .is_some_and(|binding| binding.is_removed())
    }

    /// Active bindings ordered by chord.
    pub(crate) fn bindings(&self) -> Vec<(&str, &Binding)> {
        let mut bindings: Vec<(&str, &Binding)> = self
            .bindings
            .iter()
            .filter(|(_, binding)| !binding.is_removed())
            .map(|(chord, binding)| (chord.as_str(), binding))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings
    }

    pub(crate) fn apply_overrides(&mut self, overrides: &BTreeMap<String, Binding>) {
        for (chord, binding) in overrides {
            self.bindings.insert(chord.clone(), binding.clone());
        }
    }

    /// The bindings that differ from the defaults, for persistence.
    ///
    /// A tombstone is only kept for a chord that has a default, a removed
    /// user-only chord is simply absent.
    pub(crate) fn overrides(&self) -> BTreeMap<String, Binding> {
        self.bindings
            .iter()
            .filter(|(chord, binding)| {
                let default = DEFAULT_SHORTCUTS.get(chord.as_str());
                if binding.is_removed() {
                    default.is_some()
                } else {
                    default != Some(*binding)
                }
            })
            .map(|(chord, binding)| (chord.clone(), binding.clone()))
            .collect()
    }
}

/// A key chord in canonical form.
///
/// Modifiers always render in the order Meta, Ctrl, Alt, Shift regardless of
/// the order in which they were pressed or typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Chord {
    meta: bool,
    ctrl: bool,
    alt: bool,
    shift: bool,
    key: String,
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (held, name) in [
            (self.meta, "Meta"),
            (self.ctrl, "Ctrl"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
        ] {
            if held {
                write!(f, "{}+", name)?;
            }
        }
        write!(f, "{}", self.key)
    }
}

const NAMED_KEYS: &[&str] = &[
    "Space", "Return", "Esc", "Tab", "Backspace", "Del", "Ins", "Home", "End", "PgUp", "PgDown",
    "Left", "Right", "Up", "Down",
];

/// Converts a key event into its chord string.
///
/// Returns `None` for keys that have no chord name (modifier-only presses,
/// media keys and the like).
pub(crate) fn translate_key_event(modifiers: KeyModifiers, code: KeyCode) -> Option<String> {
    let mut shift = modifiers.contains(KeyModifiers::SHIFT);

    let key = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if c.is_alphabetic() => {
            shift |= c.is_uppercase();
            c.to_uppercase().to_string()
        }
        KeyCode::Char(c) => {
            // Shift is already expressed by the symbol itself.
            shift = false;
            c.to_string()
        }
        KeyCode::Enter => "Return".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => {
            shift = true;
            "Tab".to_string()
        }
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Insert => "Ins".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDown".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => return None,
    };

    let chord = Chord {
        meta: modifiers.intersects(KeyModifiers::META | KeyModifiers::SUPER),
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
        shift,
        key,
    };

    Some(chord.to_string())
}

/// Normalizes a chord typed by the user, e.g. `shift+ctrl+t` to `Ctrl+Shift+T`.
pub(crate) fn parse_chord(text: &str) -> Option<String> {
    let mut chord = Chord {
        meta: false,
        ctrl: false,
        alt: false,
        shift: false,
        key: String::new(),
    };

    let mut rest = text.trim();
    'modifiers: loop {
        for (prefix, flag) in [
            ("meta+", &mut chord.meta),
            ("ctrl+", &mut chord.ctrl),
            ("alt+", &mut chord.alt),
            ("shift+", &mut chord.shift),
        ] {
            let matched = rest
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
            // A trailing "+" is the plus key, not a separator.
            if matched && rest.len() > prefix.len() {
                *flag = true;
                rest = &rest[prefix.len()..];
                continue 'modifiers;
            }
        }
        break;
    }

    let mut chars = rest.chars();
    chord.key = match (chars.next(), chars.next()) {
        (None, _) => return None,
        (Some(c), None) if c.is_alphabetic() => c.to_uppercase().to_string(),
        (Some(c), None) => {
            // Shift is already expressed by the symbol itself.
            chord.shift = false;
            c.to_string()
        }
        _ => {
            let named = NAMED_KEYS
                .iter()
                .find(|name| name.eq_ignore_ascii_case(rest))
                .map(|name| name.to_string());
            let function = rest
                .strip_prefix(['F', 'f'])
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| (1..=24).contains(n))
                .map(|n| format!("F{}", n));
            named.or(function)?
        }
    };

    Some(chord.to_string())
}
