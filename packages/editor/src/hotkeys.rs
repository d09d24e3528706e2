//! Keyboard shortcut matching
//!
//! Hotkeys are written `mod+b`, `shift+alt+x`, ``mod+` ``. `mod` is Meta
//! on Apple platforms and Control everywhere else. A hotkey matches only
//! when exactly its modifiers are held.

use prose_model::MarkType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Apple,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
}

/// A key press as reported by the input substrate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

/// Mark shortcuts, checked in order
pub const MARK_HOTKEYS: [(&str, MarkType); 3] = [
    ("mod+b", MarkType::Bold),
    ("mod+i", MarkType::Italic),
    ("mod+`", MarkType::Code),
];

/// Whether `event` is exactly the `hotkey` combination
pub fn is_hotkey(hotkey: &str, event: &KeyEvent, platform: Platform) -> bool {
    let mut wanted = Modifiers::default();
    let mut parts: Vec<&str> = hotkey.split('+').collect();
    // "mod++" names the plus key itself
    if hotkey.ends_with("++") {
        parts.truncate(parts.len().saturating_sub(2));
        parts.push("+");
    }
    let Some((key, modifiers)) = parts.split_last() else {
        return false;
    };

    for modifier in modifiers {
        match modifier.to_ascii_lowercase().as_str() {
            "mod" => match platform {
                Platform::Apple => wanted.meta = true,
                Platform::Other => wanted.ctrl = true,
            },
            "meta" | "cmd" | "command" => wanted.meta = true,
            "ctrl" | "control" => wanted.ctrl = true,
            "alt" | "option" => wanted.alt = true,
            "shift" => wanted.shift = true,
            _ => return false,
        }
    }

    wanted == event.modifiers && key.eq_ignore_ascii_case(&event.key)
}

/// The mark a key press toggles, if any
pub fn mark_for_event(event: &KeyEvent, platform: Platform) -> Option<MarkType> {
    MARK_HOTKEYS
        .iter()
        .find(|(hotkey, _)| is_hotkey(hotkey, event, platform))
        .map(|(_, mark)| *mark)
}
