//! Key events and normalized key combinations
//!
//! A combination is written as `ctrl+alt+shift+command+key`, always in that
//! modifier order, with lowercase key names. Two combinations match when
//! their normalized strings are equal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keys that never start or complete a capture
pub const IGNORED_KEYS: &[&str] = &["Tab", "CapsLock", "NumLock", "ScrollLock", "Unidentified", "Dead"];

const MODIFIER_KEYS: &[&str] = &["Control", "Shift", "Alt", "AltGraph", "Meta", "OS", "Super", "Hyper"];

/// A keyboard event as delivered by the input layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyEvent {
    /// DOM-style key value (`"a"`, `"~"`, `"ArrowUp"`, `" "`)
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// Command on macOS, Super elsewhere
    pub meta: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Whether the pressed key is itself a modifier
    pub fn is_modifier(&self) -> bool {
        is_modifier(&self.key)
    }

    /// Whether the key is on the capture ignore list
    pub fn is_ignored(&self) -> bool {
        self.key.is_empty() || IGNORED_KEYS.contains(&self.key.as_str())
    }
}

/// Whether `key` names a modifier key
pub fn is_modifier(key: &str) -> bool {
    MODIFIER_KEYS.contains(&key)
}

#[derive(Debug, Clone, Copy, Default)]
struct Modifiers {
    ctrl: bool,
    alt: bool,
    shift: bool,
    command: bool,
}

/// A normalized key combination; empty means unbound
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCombo(String);

impl KeyCombo {
    /// The unbound combination
    pub fn unbound() -> Self {
        Self(String::new())
    }

    /// Normalize a key event
    pub fn from_event(event: &KeyEvent) -> Self {
        let modifiers = Modifiers {
            ctrl: event.ctrl,
            alt: event.alt,
            shift: event.shift,
            command: event.meta,
        };
        Self::compose(modifiers, &event.key)
    }

    /// Normalize a stored combination such as `"Shift+~"` or `"control+A"`
    ///
    /// Unknown modifier tokens are dropped. Blank input is unbound.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::unbound();
        }

        // A trailing "++" (or a lone "+") binds the plus key itself.
        let (modifier_text, key) = if text == "+" || text.ends_with("++") {
            (&text[..text.len() - 1], "+")
        } else {
            match text.rsplit_once('+') {
                Some((modifiers, key)) => (modifiers, key),
                None => ("", text),
            }
        };

        let mut modifiers = Modifiers::default();
        for token in modifier_text.split('+').map(str::trim).filter(|t| !t.is_empty()) {
            match token.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "command" | "cmd" | "meta" | "super" => modifiers.command = true,
                other => tracing::debug!(token = other, combo = text, "Ignoring unknown modifier"),
            }
        }
        Self::compose(modifiers, key.trim())
    }

    fn compose(mut modifiers: Modifiers, raw_key: &str) -> Self {
        if raw_key.is_empty() {
            return Self::unbound();
        }
        // The shifted character already encodes shift.
        if is_symbol(raw_key) {
            modifiers.shift = false;
        }

        let key = canonical_key(raw_key);
        let mut parts: Vec<&str> = Vec::with_capacity(5);
        if modifiers.ctrl {
            parts.push("ctrl");
        }
        if modifiers.alt {
            parts.push("alt");
        }
        if modifiers.shift {
            parts.push("shift");
        }
        if modifiers.command {
            parts.push("command");
        }
        parts.push(&key);
        Self(parts.join("+"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unbound(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_symbol(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_alphanumeric() && !c.is_whitespace())
}

/// Canonical lowercase name of a key
pub fn canonical_key(key: &str) -> String {
    if key == " " {
        return "space".to_string();
    }
    let lower = key.to_lowercase();
    match lower.as_str() {
        "arrowup" | "up" => "up",
        "arrowdown" | "down" => "down",
        "arrowleft" | "left" => "left",
        "arrowright" | "right" => "right",
        "spacebar" | "space" => "space",
        "escape" | "esc" => "esc",
        "enter" | "return" => "enter",
        "backspace" => "backspace",
        "delete" | "del" => "del",
        "insert" | "ins" => "ins",
        "pageup" => "pageup",
        "pagedown" => "pagedown",
        "home" => "home",
        "end" => "end",
        "tab" => "tab",
        "+" | "plus" => "plus",
        _ => return lower,
    }
    .to_string()
}
