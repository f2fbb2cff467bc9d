use super::models::ReadingPreferences;
use crate::statistics::ReadingStatistics;
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const PREFERENCES_FILE_NAME: &str = "preferences.json";
pub const STATISTICS_FILE_NAME: &str = "statistics.json";

/// Persists preferences and reading statistics as JSON in the data directory.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    dir: PathBuf,
}

impl PreferencesStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PreferencesStore { dir: dir.into() }
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILE_NAME)
    }

    pub fn statistics_path(&self) -> PathBuf {
        self.dir.join(STATISTICS_FILE_NAME)
    }

    /// Missing or unreadable files yield defaults.
    pub fn load(&self) -> ReadingPreferences {
        load_or_default::<ReadingPreferences>(&self.preferences_path(), "preferences").normalized()
    }

    pub fn save(&self, prefs: &ReadingPreferences) -> Result<()> {
        write_json(&self.dir, &self.preferences_path(), prefs)
    }

    /// Overwrite stored preferences with the defaults and return them.
    pub fn reset(&self) -> Result<ReadingPreferences> {
        let prefs = ReadingPreferences::default();
        self.save(&prefs)?;
        info!("Preferences reset to defaults");
        Ok(prefs)
    }

    pub fn export(&self, prefs: &ReadingPreferences) -> Result<String> {
        serde_json::to_string_pretty(prefs).context("Failed to serialize preferences")
    }

    /// Parse preferences from JSON text, store them and return them.
    pub fn import(&self, json: &str) -> Result<ReadingPreferences> {
        let prefs = serde_json::from_str::<ReadingPreferences>(json)
            .context("Invalid preferences JSON")?
            .normalized();
        self.save(&prefs)?;
        info!("Imported preferences");
        Ok(prefs)
    }

    pub fn load_statistics(&self) -> ReadingStatistics {
        load_or_default(&self.statistics_path(), "statistics")
    }

    pub fn save_statistics(&self, stats: &ReadingStatistics) -> Result<()> {
        write_json(&self.dir, &self.statistics_path(), stats)
    }
}

fn load_or_default<T: DeserializeOwned + Default>(path: &Path, what: &str) -> T {
    if !path.exists() {
        debug!(path = %path.display(), "No {what} file yet; using defaults");
        return T::default();
    }
    let parsed = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))
        .and_then(|data| {
            serde_json::from_str::<T>(&data)
                .with_context(|| format!("Invalid JSON in {}", path.display()))
        });
    match parsed {
        Ok(value) => {
            debug!(path = %path.display(), "Loaded {what}");
            value
        }
        Err(err) => {
            warn!(path = %path.display(), "Falling back to default {what}: {err:#}");
            T::default()
        }
    }
}

fn write_json<T: Serialize>(dir: &Path, path: &Path, value: &T) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Saved JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::hotkeys::{HotkeyAction, KeyModifiers};
    use crate::theme::CustomTheme;

    fn store() -> (tempfile::TempDir, PreferencesStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::new(dir.path().join("YuYue"));
        (dir, store)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let (_dir, store) = store();
        assert_eq!(store.load(), ReadingPreferences::default());
        assert_eq!(store.load_statistics(), ReadingStatistics::default());
    }

    #[test]
    fn save_then_load_round_trips_every_field() {
        let (_dir, store) = store();
        let mut prefs = ReadingPreferences::default();
        prefs.set_font_size(20);
        prefs.paragraph_spacing = 12.0;
        prefs.enable_first_line_indent = false;
        prefs.column_count = 2;
        prefs.page_size = 2000;
        prefs.selected_theme_name = "Mine".into();
        prefs.use_dark_theme = true;
        prefs.custom_theme = Some(CustomTheme {
            name: "Mine".into(),
            background_color: "#101010".into(),
            foreground_color: "#EEEEEE".into(),
        });
        prefs.auto_page_enabled = true;
        prefs.auto_page_interval = 45;
        prefs.immersive_mode_enabled = true;
        prefs.show_chapter_panel = true;
        prefs.show_bookmark_panel = true;
        prefs.window_topmost = true;
        prefs.window_opacity = 0.8;
        prefs.auto_save_interval = 60;
        prefs.hotkey_configs[1].key = "Space".into();
        prefs.hotkey_configs[2].enabled = false;
        prefs.auto_start_enabled = true;

        store.save(&prefs).unwrap();
        assert_eq!(store.load(), prefs);
    }

    #[test]
    fn partial_and_pascal_case_files_fill_defaults() {
        let (_dir, store) = store();
        fs::create_dir_all(store.preferences_path().parent().unwrap()).unwrap();
        fs::write(
            store.preferences_path(),
            r#"{ "FontSize": 20, "PageSize": 99999, "AutoPageInterval": 1 }"#,
        )
        .unwrap();
        let prefs = store.load();
        assert_eq!(prefs.font_size, 20);
        assert_eq!(prefs.page_size, crate::pagination::MAX_PAGE_SIZE);
        assert_eq!(prefs.auto_page_interval, 3);
        assert!(prefs.auto_resume_last_book);
        assert_eq!(prefs.hotkey_configs.len(), HotkeyAction::ALL.len());
    }

    #[test]
    fn windows_build_file_keeps_settings_and_readable_hotkeys() {
        let (_dir, store) = store();
        fs::create_dir_all(store.preferences_path().parent().unwrap()).unwrap();
        fs::write(
            store.preferences_path(),
            r##"{
                "FontSize": 20,
                "PageSize": 1500,
                "CustomTheme": { "Name": "Paper", "BackgroundColor": "#F0EAD6", "ForegroundColor": "#333333" },
                "HotkeyConfigs": [
                    { "Action": "ShowHide", "Description": "show", "Modifiers": 3, "Key": 68, "IsEnabled": true },
                    { "Action": "NextPage", "Description": "next", "Modifiers": 0, "Key": 20, "IsEnabled": false },
                    { "Action": "AddBookmark", "Modifiers": 2, "Key": 999, "IsEnabled": true },
                    { "Action": "Mystery", "Modifiers": 0, "Key": 44, "IsEnabled": true }
                ]
            }"##,
        )
        .unwrap();

        let prefs = store.load();
        assert_eq!(prefs.font_size, 20);
        assert_eq!(prefs.page_size, 1500);
        let theme = prefs.custom_theme.as_ref().unwrap();
        assert_eq!(theme.name, "Paper");
        assert_eq!(theme.background_color, "#F0EAD6");

        let hotkeys = &prefs.hotkey_configs;
        assert_eq!(hotkeys.len(), HotkeyAction::ALL.len());
        assert_eq!(hotkeys[0].action, HotkeyAction::ShowHide);
        assert_eq!(hotkeys[0].modifiers, KeyModifiers::CTRL.with_alt());
        assert_eq!(hotkeys[0].key, "Y");
        assert_eq!(hotkeys[1].action, HotkeyAction::NextPage);
        assert_eq!(hotkeys[1].key, "PageDown");
        assert!(!hotkeys[1].enabled);
        let bookmark = hotkeys
            .iter()
            .find(|config| config.action == HotkeyAction::AddBookmark)
            .unwrap();
        assert_eq!(bookmark.key, "D");
    }

    #[test]
    fn malformed_custom_theme_is_dropped_alone() {
        let (_dir, store) = store();
        fs::create_dir_all(store.preferences_path().parent().unwrap()).unwrap();
        fs::write(
            store.preferences_path(),
            r#"{ "FontSize": 22, "CustomTheme": { "Name": 5 }, "HotkeyConfigs": "none" }"#,
        )
        .unwrap();
        let prefs = store.load();
        assert_eq!(prefs.font_size, 22);
        assert!(prefs.custom_theme.is_none());
        assert_eq!(prefs.hotkey_configs, crate::hotkeys::default_hotkeys());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let (_dir, store) = store();
        fs::create_dir_all(store.preferences_path().parent().unwrap()).unwrap();
        fs::write(store.preferences_path(), "[1, 2").unwrap();
        assert_eq!(store.load(), ReadingPreferences::default());
    }

    #[test]
    fn export_import_and_reset() {
        let (_dir, store) = store();
        let mut prefs = ReadingPreferences::default();
        prefs.hotkey_configs[0].modifiers = KeyModifiers::CTRL.with_shift();
        let json = store.export(&prefs).unwrap();

        let imported = store.import(&json).unwrap();
        assert_eq!(imported, prefs);
        assert_eq!(store.load(), prefs);

        assert!(store.import("not json").is_err());
        assert_eq!(store.load(), prefs);

        let reset = store.reset().unwrap();
        assert_eq!(reset, ReadingPreferences::default());
        assert_eq!(store.load(), reset);
    }

    #[test]
    fn statistics_round_trip_through_the_store() {
        let (_dir, store) = store();
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut stats = store.load_statistics();
        stats.record_minutes(day, 12);
        stats.record_minutes(day.succ_opt().unwrap(), 8);
        store.save_statistics(&stats).unwrap();
        let loaded = store.load_statistics();
        assert_eq!(loaded, stats);
        assert_eq!(loaded.current_streak, 2);
        assert_eq!(loaded.total_reading_minutes, 20);
    }
}
