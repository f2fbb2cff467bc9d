//! Keyboard hotkey table.
//!
//! Every action has one chord (modifier set + key name). Key names are kept in
//! a canonical form (`"Y"`, `"PageDown"`, `"F11"`) so configs written by hand
//! or by an older build compare equal to what the keyboard handler produces.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HotkeyAction {
    ShowHide,
    NextPage,
    PreviousPage,
    NextChapter,
    PreviousChapter,
    AddBookmark,
    ToggleImmersive,
    ToggleCamouflage,
    SaveProgress,
    BackToBookshelf,
    ToggleTimer,
}

impl HotkeyAction {
    pub const ALL: [HotkeyAction; 11] = [
        HotkeyAction::ShowHide,
        HotkeyAction::NextPage,
        HotkeyAction::PreviousPage,
        HotkeyAction::NextChapter,
        HotkeyAction::PreviousChapter,
        HotkeyAction::AddBookmark,
        HotkeyAction::ToggleImmersive,
        HotkeyAction::ToggleCamouflage,
        HotkeyAction::SaveProgress,
        HotkeyAction::BackToBookshelf,
        HotkeyAction::ToggleTimer,
    ];

    pub fn description(self) -> &'static str {
        match self {
            HotkeyAction::ShowHide => "Show / hide window",
            HotkeyAction::NextPage => "Next page",
            HotkeyAction::PreviousPage => "Previous page",
            HotkeyAction::NextChapter => "Next chapter",
            HotkeyAction::PreviousChapter => "Previous chapter",
            HotkeyAction::AddBookmark => "Add bookmark",
            HotkeyAction::ToggleImmersive => "Immersive mode",
            HotkeyAction::ToggleCamouflage => "Camouflage mode",
            HotkeyAction::SaveProgress => "Save progress",
            HotkeyAction::BackToBookshelf => "Back to bookshelf",
            HotkeyAction::ToggleTimer => "Pause / resume timer",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub logo: bool,
}

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers {
        ctrl: false,
        alt: false,
        shift: false,
        logo: false,
    };
    pub const CTRL: KeyModifiers = KeyModifiers {
        ctrl: true,
        ..KeyModifiers::NONE
    };

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// One binding. The PascalCase aliases and the numeric modifier and key forms
/// accept tables written by the Windows build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    #[serde(alias = "Action")]
    pub action: HotkeyAction,
    #[serde(default, alias = "Description")]
    pub description: String,
    #[serde(default, alias = "Modifiers", deserialize_with = "stored_modifiers")]
    pub modifiers: KeyModifiers,
    #[serde(alias = "Key", deserialize_with = "stored_key")]
    pub key: String,
    #[serde(default = "enabled_by_default", alias = "IsEnabled")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredModifiers {
    Flags(u32),
    Set(KeyModifiers),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredKey {
    Code(u32),
    Name(String),
}

fn stored_modifiers<'de, D>(deserializer: D) -> Result<KeyModifiers, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StoredModifiers::deserialize(deserializer)? {
        StoredModifiers::Set(modifiers) => modifiers,
        // Alt = 1, Control = 2, Shift = 4, Windows = 8.
        StoredModifiers::Flags(flags) => KeyModifiers {
            alt: flags & 1 != 0,
            ctrl: flags & 2 != 0,
            shift: flags & 4 != 0,
            logo: flags & 8 != 0,
        },
    })
}

fn stored_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match StoredKey::deserialize(deserializer)? {
        StoredKey::Name(name) => Ok(name),
        StoredKey::Code(code) => windows_key_name(code)
            .ok_or_else(|| de::Error::custom(format!("unsupported key code {code}"))),
    }
}

/// Canonical name for a numeric key from the Windows build's key enumeration.
fn windows_key_name(code: u32) -> Option<String> {
    let named = match code {
        2 => "Backspace",
        3 => "Tab",
        6 => "Enter",
        13 => "Escape",
        18 => "Space",
        19 => "PageUp",
        20 => "PageDown",
        21 => "End",
        22 => "Home",
        23 => "Left",
        24 => "Up",
        25 => "Right",
        26 => "Down",
        32 => "Delete",
        34..=43 => return char::from_digit(code - 34, 10).map(String::from),
        44..=69 => return char::from_u32('A' as u32 + code - 44).map(String::from),
        90..=113 => return Some(format!("F{}", code - 89)),
        _ => return None,
    };
    Some(named.to_string())
}

/// Read a stored hotkey list, skipping entries that cannot be understood.
/// Missing actions are filled in later by [`merge_with_defaults`].
pub fn lenient_hotkey_list<'de, D>(deserializer: D) -> Result<Vec<HotkeyConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(entries) = raw else {
        warn!("Stored hotkey table is not a list; using defaults");
        return Ok(default_hotkeys());
    };
    let total = entries.len();
    let kept: Vec<HotkeyConfig> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if kept.len() < total {
        warn!(skipped = total - kept.len(), "Ignored unreadable hotkey entries");
    }
    Ok(kept)
}

impl HotkeyConfig {
    pub fn new(action: HotkeyAction, modifiers: KeyModifiers, key: &str) -> Self {
        HotkeyConfig {
            action,
            description: action.description().to_string(),
            modifiers,
            key: key.to_string(),
            enabled: true,
        }
    }

    /// Human readable chord such as `Ctrl+Alt+Y`.
    pub fn display_text(&self) -> String {
        chord_text(self.modifiers, &self.key)
    }

    pub fn matches(&self, modifiers: KeyModifiers, key: &str) -> bool {
        self.enabled
            && self.modifiers == modifiers
            && normalize_key_name(&self.key).as_deref() == Some(key)
    }
}

pub fn default_hotkeys() -> Vec<HotkeyConfig> {
    use HotkeyAction::*;
    let ctrl = KeyModifiers::CTRL;
    vec![
        HotkeyConfig::new(ShowHide, ctrl.with_alt(), "Y"),
        HotkeyConfig::new(NextPage, KeyModifiers::NONE, "PageDown"),
        HotkeyConfig::new(PreviousPage, KeyModifiers::NONE, "PageUp"),
        HotkeyConfig::new(NextChapter, ctrl, "Down"),
        HotkeyConfig::new(PreviousChapter, ctrl, "Up"),
        HotkeyConfig::new(AddBookmark, ctrl, "D"),
        HotkeyConfig::new(ToggleImmersive, KeyModifiers::NONE, "F11"),
        HotkeyConfig::new(ToggleCamouflage, ctrl.with_shift(), "C"),
        HotkeyConfig::new(SaveProgress, ctrl, "S"),
        HotkeyConfig::new(BackToBookshelf, KeyModifiers::NONE, "Escape"),
        HotkeyConfig::new(ToggleTimer, ctrl, "P"),
    ]
}

pub fn chord_text(modifiers: KeyModifiers, key: &str) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(5);
    if modifiers.ctrl {
        parts.push("Ctrl");
    }
    if modifiers.alt {
        parts.push("Alt");
    }
    if modifiers.shift {
        parts.push("Shift");
    }
    if modifiers.logo {
        parts.push("Win");
    }
    parts.push(key);
    parts.join("+")
}

/// Parse text like `"ctrl + shift + c"` into a chord with a canonical key.
pub fn parse_chord(raw: &str) -> Option<(KeyModifiers, String)> {
    let mut modifiers = KeyModifiers::NONE;
    let mut key = None;
    for token in raw.split('+').map(str::trim).filter(|s| !s.is_empty()) {
        match token.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.ctrl = true,
            "alt" => modifiers.alt = true,
            "shift" => modifiers.shift = true,
            "win" | "logo" | "meta" | "super" | "cmd" | "command" => modifiers.logo = true,
            _ => {
                if key.is_some() {
                    return None;
                }
                key = Some(normalize_key_name(token)?);
            }
        }
    }
    key.map(|key| (modifiers, key))
}

/// Canonical spelling of a key name, or `None` if it is not a bindable key.
pub fn normalize_key_name(raw: &str) -> Option<String> {
    let lower = raw.trim().to_ascii_lowercase();
    let named = match lower.as_str() {
        "pagedown" | "pgdn" | "next" => "PageDown",
        "pageup" | "pgup" | "prior" => "PageUp",
        "up" | "arrowup" => "Up",
        "down" | "arrowdown" => "Down",
        "left" | "arrowleft" => "Left",
        "right" | "arrowright" => "Right",
        "esc" | "escape" => "Escape",
        "space" | "spacebar" => "Space",
        "enter" | "return" => "Enter",
        "tab" => "Tab",
        "home" => "Home",
        "end" => "End",
        "del" | "delete" => "Delete",
        "backspace" | "back" => "Backspace",
        _ => "",
    };
    if !named.is_empty() {
        return Some(named.to_string());
    }
    if let Some(n) = lower.strip_prefix('f').and_then(|num| num.parse::<u8>().ok()) {
        if (1..=24).contains(&n) {
            return Some(format!("F{n}"));
        }
        return None;
    }
    let mut chars = lower.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if !ch.is_whitespace() => Some(ch.to_uppercase().collect()),
        _ => None,
    }
}

/// The other enabled hotkey already bound to this chord, if any.
pub fn find_conflict<'a>(
    configs: &'a [HotkeyConfig],
    candidate_index: usize,
    modifiers: KeyModifiers,
    key: &str,
) -> Option<&'a HotkeyConfig> {
    let key = normalize_key_name(key)?;
    configs
        .iter()
        .enumerate()
        .find(|(idx, config)| *idx != candidate_index && config.matches(modifiers, &key))
        .map(|(_, config)| config)
}

/// Action bound to a pressed chord. `key` must already be canonical.
pub fn match_chord(
    configs: &[HotkeyConfig],
    modifiers: KeyModifiers,
    key: &str,
) -> Option<HotkeyAction> {
    configs
        .iter()
        .find(|config| config.matches(modifiers, key))
        .map(|config| config.action)
}

/// Fill in actions missing from a stored list with their defaults.
pub fn merge_with_defaults(configs: Vec<HotkeyConfig>) -> Vec<HotkeyConfig> {
    let mut merged: Vec<HotkeyConfig> = Vec::with_capacity(HotkeyAction::ALL.len());
    for config in configs.into_iter().chain(default_hotkeys()) {
        if !merged.iter().any(|c| c.action == config.action) {
            merged.push(config);
        }
    }
    merged.sort_by_key(|config| HotkeyAction::ALL.iter().position(|a| *a == config.action));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_one_chord_per_action() {
        let configs = default_hotkeys();
        assert_eq!(configs.len(), HotkeyAction::ALL.len());
        for (idx, config) in configs.iter().enumerate() {
            assert!(
                find_conflict(&configs, idx, config.modifiers, &config.key).is_none(),
                "{} conflicts",
                config.display_text()
            );
        }
    }

    #[test]
    fn display_text_round_trips_through_parse() {
        for config in default_hotkeys() {
            let (modifiers, key) = parse_chord(&config.display_text()).unwrap();
            assert_eq!(modifiers, config.modifiers);
            assert_eq!(key, config.key);
        }
        assert_eq!(default_hotkeys()[0].display_text(), "Ctrl+Alt+Y");
    }

    #[test]
    fn numeric_windows_entries_are_understood() {
        let config: HotkeyConfig = serde_json::from_str(
            r#"{ "Action": "ToggleCamouflage", "Modifiers": 6, "Key": 46, "IsEnabled": true }"#,
        )
        .unwrap();
        assert_eq!(config.modifiers, KeyModifiers::CTRL.with_shift());
        assert_eq!(config.key, "C");

        let f_key: HotkeyConfig =
            serde_json::from_str(r#"{ "Action": "ToggleImmersive", "Key": 100 }"#).unwrap();
        assert_eq!(f_key.key, "F11");
        assert_eq!(f_key.modifiers, KeyModifiers::NONE);
        assert!(f_key.enabled);

        let digit: HotkeyConfig =
            serde_json::from_str(r#"{ "action": "SaveProgress", "key": 35 }"#).unwrap();
        assert_eq!(digit.key, "1");
    }

    #[test]
    fn parse_accepts_loose_spelling() {
        let (modifiers, key) = parse_chord(" control + SHIFT + c ").unwrap();
        assert_eq!(modifiers, KeyModifiers::CTRL.with_shift());
        assert_eq!(key, "C");
        assert_eq!(parse_chord("pgdn").unwrap().1, "PageDown");
        assert_eq!(parse_chord("f11").unwrap().1, "F11");
        assert!(parse_chord("ctrl+").is_none());
        assert!(parse_chord("ctrl+a+b").is_none());
        assert!(parse_chord("f99").is_none());
    }

    #[test]
    fn matches_exact_modifiers_only() {
        let configs = default_hotkeys();
        assert_eq!(
            match_chord(&configs, KeyModifiers::CTRL, "D"),
            Some(HotkeyAction::AddBookmark)
        );
        assert_eq!(match_chord(&configs, KeyModifiers::CTRL.with_shift(), "D"), None);
        assert_eq!(
            match_chord(&configs, KeyModifiers::NONE, "PageDown"),
            Some(HotkeyAction::NextPage)
        );
    }

    #[test]
    fn disabled_hotkeys_neither_match_nor_conflict() {
        let mut configs = default_hotkeys();
        configs[5].enabled = false;
        assert_eq!(match_chord(&configs, KeyModifiers::CTRL, "D"), None);
        assert!(find_conflict(&configs, 0, KeyModifiers::CTRL, "d").is_none());
    }

    #[test]
    fn reports_conflicting_binding() {
        let configs = default_hotkeys();
        let conflict = find_conflict(&configs, 0, KeyModifiers::CTRL, "s").unwrap();
        assert_eq!(conflict.action, HotkeyAction::SaveProgress);
        // Rebinding an action to its own chord is not a conflict.
        assert!(find_conflict(&configs, 8, KeyModifiers::CTRL, "S").is_none());
    }

    #[test]
    fn merge_restores_missing_actions() {
        let stored = vec![HotkeyConfig::new(
            HotkeyAction::NextPage,
            KeyModifiers::NONE,
            "Space",
        )];
        let merged = merge_with_defaults(stored);
        assert_eq!(merged.len(), HotkeyAction::ALL.len());
        assert_eq!(merged[0].action, HotkeyAction::ShowHide);
        assert_eq!(merged[1].key, "Space");
    }

    #[test]
    fn merge_drops_duplicate_actions() {
        let stored = vec![
            HotkeyConfig::new(HotkeyAction::SaveProgress, KeyModifiers::CTRL, "W"),
            HotkeyConfig::new(HotkeyAction::SaveProgress, KeyModifiers::CTRL, "Q"),
        ];
        let merged = merge_with_defaults(stored);
        let saves: Vec<_> = merged
            .iter()
            .filter(|c| c.action == HotkeyAction::SaveProgress)
            .collect();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].key, "W");
    }
}
