//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_down: Vec<String>,
    pub move_up: Vec<String>,
    pub scroll_down: Vec<String>,
    pub scroll_up: Vec<String>,
    pub activate: Vec<String>,
    pub close: Vec<String>,
    pub open_url: Vec<String>,
    pub save: Vec<String>,
    pub delete: Vec<String>,
    pub fetch_document: Vec<String>,
    pub open_document: Vec<String>,
    pub help: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_down: keys(&["j", "Down"]),
            move_up: keys(&["k", "Up"]),
            scroll_down: keys(&["Ctrl+e"]),
            scroll_up: keys(&["Ctrl+y"]),
            activate: keys(&["Enter", "Space", "a"]),
            close: keys(&["Esc"]),
            open_url: keys(&["u"]),
            save: keys(&["s"]),
            delete: keys(&["d"]),
            fetch_document: keys(&["g"]),
            open_document: keys(&["o", "O"]),
            help: keys(&["h", "?", "F1"]),
        }
    }
}

impl KeybindingConfig {
    fn table(&self) -> [(&[String], Action); 13] {
        [
            (self.quit.as_slice(), Action::Quit),
            (self.move_down.as_slice(), Action::MoveDown),
            (self.move_up.as_slice(), Action::MoveUp),
            (self.scroll_down.as_slice(), Action::ScrollDown),
            (self.scroll_up.as_slice(), Action::ScrollUp),
            (self.activate.as_slice(), Action::Activate),
            (self.close.as_slice(), Action::Close),
            (self.open_url.as_slice(), Action::OpenUrl),
            (self.save.as_slice(), Action::Save),
            (self.delete.as_slice(), Action::Delete),
            (self.fetch_document.as_slice(), Action::FetchDocument),
            (self.open_document.as_slice(), Action::OpenDocument),
            (self.help.as_slice(), Action::Help),
        ]
    }

    /// Action bound to `key`; the first matching binding wins.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        self.table()
            .into_iter()
            .find(|(bindings, _)| matches_any(key, bindings))
            .map_or(Action::None, |(_, action)| action)
    }

    /// Configured keys of each action, for the help overlay.
    pub fn describe(&self) -> Vec<(Action, String)> {
        self.table()
            .into_iter()
            .map(|(bindings, action)| (action, bindings.join(", ")))
            .collect()
    }
}

fn matches_any(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_key_string(binding).ok())
        .any(|parsed| parsed.matches(key))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is implied by an upper-case character, so it is ignored when
    /// comparing against a binding that does not name it.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse "j", "Enter", "F1" or "Ctrl+e" style key names.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    // A lone "+" is the plus key, not a separator.
    let (modifier_part, key_part) = match s.rfind('+') {
        Some(idx) if idx + 1 < s.len() => (&s[..idx], &s[idx + 1..]),
        _ => ("", s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_part.split('+').filter(|p| !p.is_empty()) {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    Ok(KeyBinding {
        code: parse_key_code(key_part)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        _ => Err(format!("Unknown key: {}", s)),
    }
}
