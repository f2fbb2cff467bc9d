//! Reading themes and their mapping onto an iced theme.

use iced::Theme as IcedTheme;
use iced::theme::Palette;
use iced::Color;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

pub const DAY_THEME: &str = "Day";
pub const NIGHT_THEME: &str = "Night";

/// An sRGB color stored as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn parse_hex(raw: &str) -> Option<Rgb> {
        let hex = raw.trim().strip_prefix('#').unwrap_or(raw.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Relative brightness in `[0, 1]`.
    pub fn luminance(self) -> f32 {
        (0.299 * self.0 as f32 + 0.587 * self.1 as f32 + 0.114 * self.2 as f32) / 255.0
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::from_rgb8(rgb.0, rgb.1, rgb.2)
    }
}

/// User-defined colors, persisted in preferences as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTheme {
    #[serde(default = "default_custom_name", alias = "Name")]
    pub name: String,
    #[serde(alias = "BackgroundColor")]
    pub background_color: String,
    #[serde(alias = "ForegroundColor")]
    pub foreground_color: String,
}

fn default_custom_name() -> String {
    "Custom".to_string()
}

/// Read a stored custom theme; anything unreadable counts as no theme.
pub fn lenient_custom_theme<'de, D>(deserializer: D) -> Result<Option<CustomTheme>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    let theme = serde_json::from_value(raw).ok();
    if theme.is_none() {
        warn!("Ignored unreadable custom theme");
    }
    Ok(theme)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingTheme {
    pub name: String,
    pub background: Rgb,
    pub foreground: Rgb,
    pub built_in: bool,
}

impl fmt::Display for ReadingTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

const PRESETS: [(&str, Rgb, Rgb); 8] = [
    (DAY_THEME, Rgb(0xFB, 0xFC, 0xFE), Rgb(0x2C, 0x3E, 0x50)),
    (NIGHT_THEME, Rgb(0x1E, 0x25, 0x33), Rgb(0xEC, 0xF0, 0xF1)),
    ("Sepia", Rgb(0xF4, 0xE8, 0xD0), Rgb(0x5C, 0x4B, 0x3A)),
    ("Green", Rgb(0xC7, 0xED, 0xCC), Rgb(0x2C, 0x3E, 0x50)),
    ("Ocean", Rgb(0xE3, 0xF2, 0xFD), Rgb(0x1A, 0x23, 0x7E)),
    ("Sakura", Rgb(0xFC, 0xE4, 0xEC), Rgb(0x88, 0x05, 0x50)),
    ("Gray", Rgb(0xE8, 0xE8, 0xE8), Rgb(0x42, 0x42, 0x42)),
    ("Amber", Rgb(0xFF, 0xF8, 0xE1), Rgb(0x5D, 0x4E, 0x37)),
];

pub fn presets() -> Vec<ReadingTheme> {
    PRESETS
        .iter()
        .map(|(name, background, foreground)| ReadingTheme {
            name: (*name).to_string(),
            background: *background,
            foreground: *foreground,
            built_in: true,
        })
        .collect()
}

pub fn preset(name: &str) -> Option<ReadingTheme> {
    presets()
        .into_iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name))
}

fn day() -> ReadingTheme {
    let (name, background, foreground) = PRESETS[0];
    ReadingTheme {
        name: name.to_string(),
        background,
        foreground,
        built_in: true,
    }
}

impl CustomTheme {
    /// Invalid hex strings fall back to the Day colors.
    pub fn to_reading_theme(&self) -> ReadingTheme {
        let fallback = day();
        ReadingTheme {
            name: self.name.clone(),
            background: Rgb::parse_hex(&self.background_color).unwrap_or(fallback.background),
            foreground: Rgb::parse_hex(&self.foreground_color).unwrap_or(fallback.foreground),
            built_in: false,
        }
    }
}

/// Theme for the current preference values.
pub fn resolve(selected: &str, use_dark: bool, custom: Option<&CustomTheme>) -> ReadingTheme {
    if use_dark {
        return preset(NIGHT_THEME).unwrap_or_else(day);
    }
    if let Some(custom) = custom.filter(|c| c.name == selected) {
        return custom.to_reading_theme();
    }
    preset(selected).unwrap_or_else(day)
}

impl From<&ReadingTheme> for IcedTheme {
    fn from(theme: &ReadingTheme) -> Self {
        let base = if theme.background.luminance() < 0.5 {
            Palette::DARK
        } else {
            Palette::LIGHT
        };
        IcedTheme::custom(
            theme.name.clone(),
            Palette {
                background: theme.background.into(),
                text: theme.foreground.into(),
                primary: theme.foreground.into(),
                ..base
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Rgb::parse_hex("#C7EDCC"), Some(Rgb(0xC7, 0xED, 0xCC)));
        assert_eq!(Rgb::parse_hex("1e2533"), Some(Rgb(0x1E, 0x25, 0x33)));
        assert_eq!(Rgb::parse_hex("#12345"), None);
        assert_eq!(Rgb::parse_hex("#GG0000"), None);
        assert_eq!(Rgb(0x0A, 0xFF, 0x00).to_hex(), "#0AFF00");
    }

    #[test]
    fn has_eight_presets_starting_with_day() {
        let all = presets();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0].name, DAY_THEME);
        assert_eq!(preset("sakura").map(|t| t.foreground), Some(Rgb(0x88, 0x05, 0x50)));
    }

    #[test]
    fn dark_toggle_wins_over_selection() {
        assert_eq!(resolve("Sepia", true, None).name, NIGHT_THEME);
        assert_eq!(resolve("Sepia", false, None).name, "Sepia");
        assert_eq!(resolve("Unknown", false, None).name, DAY_THEME);
    }

    #[test]
    fn custom_theme_falls_back_per_channel() {
        let custom = CustomTheme {
            name: "Mine".into(),
            background_color: "#000000".into(),
            foreground_color: "oops".into(),
        };
        let theme = resolve("Mine", false, Some(&custom));
        assert_eq!(theme.background, Rgb(0, 0, 0));
        assert_eq!(theme.foreground, day().foreground);
        assert!(!theme.built_in);
    }
}
