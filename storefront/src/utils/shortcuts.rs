//! # Keyboard Shortcuts
//!
//! Key + modifier bindings. Keys compare case-insensitively; a modifier is
//! only required when the binding sets it, so extra modifiers held by the
//! user do not prevent a match.

use std::str::FromStr;

/// One key press as reported by the input layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }
}

/// Parses `ctrl+shift+k` style combos.
impl FromStr for KeyPress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut press = KeyPress::default();
        for part in s.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "" => return Err(format!("Invalid key combo: {}", s)),
                "ctrl" | "control" => press.ctrl = true,
                "shift" => press.shift = true,
                "alt" | "option" => press.alt = true,
                "meta" | "cmd" | "super" => press.meta = true,
                _ if press.key.is_empty() => press.key = part.to_string(),
                _ => return Err(format!("Invalid key combo: {}", s)),
            }
        }
        if press.key.is_empty() {
            return Err(format!("Invalid key combo: {}", s));
        }
        Ok(press)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shortcut<A> {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    pub action: A,
}

impl<A> Shortcut<A> {
    pub fn new(key: impl Into<String>, action: A) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
            action,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn matches(&self, press: &KeyPress) -> bool {
        press.key.to_lowercase() == self.key.to_lowercase()
            && (!self.ctrl || press.ctrl)
            && (!self.shift || press.shift)
            && (!self.alt || press.alt)
            && (!self.meta || press.meta)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShortcutMap<A> {
    shortcuts: Vec<Shortcut<A>>,
    enabled: bool,
}

impl<A> ShortcutMap<A> {
    pub fn new(shortcuts: Vec<Shortcut<A>>) -> Self {
        Self {
            shortcuts,
            enabled: true,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Actions of every binding matching `press`, in registration order.
    pub fn matching(&self, press: &KeyPress) -> Vec<&A> {
        if !self.enabled {
            return Vec::new();
        }
        self.shortcuts
            .iter()
            .filter(|s| s.matches(press))
            .map(|s| &s.action)
            .collect()
    }

    pub fn shortcuts(&self) -> &[Shortcut<A>] {
        &self.shortcuts
    }
}
