use super::super::state::{App, Section};
use super::Effect;
use crate::camouflage::CamouflageTemplate;
use crate::hotkeys::{self, default_hotkeys};
use crate::preferences::ReadingPreferences;
use crate::theme::{CustomTheme, Rgb};
use std::path::PathBuf;
use tracing::{info, warn};

const CUSTOM_THEME_NAME: &str = "Custom";

impl App {
    pub(super) fn handle_show_settings(&mut self) {
        if self.section == Section::Settings {
            return;
        }
        self.settings.return_to = self.section;
        self.sync_settings_inputs();
        self.section = Section::Settings;
    }

    pub(super) fn handle_close_settings(&mut self) {
        if self.section != Section::Settings {
            return;
        }
        self.section = match self.settings.return_to {
            Section::Reader if self.reader.book_id.is_some() => Section::Reader,
            _ => Section::Bookshelf,
        };
    }

    pub(super) fn handle_toggle_auto_resume(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.auto_resume_last_book = !self.prefs.auto_resume_last_book;
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_toggle_auto_save_progress(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.auto_save_progress = !self.prefs.auto_save_progress;
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_toggle_reading_timer_enabled(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.enable_reading_timer = !self.prefs.enable_reading_timer;
        if !self.prefs.enable_reading_timer {
            self.timer.pause();
        } else if self.timer.is_paused() {
            self.timer.resume();
        } else if let Some(minutes) = self.current_book().map(|book| book.reading_minutes) {
            self.timer.start(minutes);
        }
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_custom_background_changed(&mut self, value: String) {
        self.settings.custom_background = value;
    }

    pub(super) fn handle_custom_foreground_changed(&mut self, value: String) {
        self.settings.custom_foreground = value;
    }

    pub(super) fn handle_apply_custom_theme(&mut self, effects: &mut Vec<Effect>) {
        let background = Rgb::parse_hex(&self.settings.custom_background);
        let foreground = Rgb::parse_hex(&self.settings.custom_foreground);
        let (Some(background), Some(foreground)) = (background, foreground) else {
            self.status_message = "Colors must be written as #RRGGBB.".to_string();
            return;
        };
        self.prefs.custom_theme = Some(CustomTheme {
            name: CUSTOM_THEME_NAME.to_string(),
            background_color: background.to_hex(),
            foreground_color: foreground.to_hex(),
        });
        self.prefs.selected_theme_name = CUSTOM_THEME_NAME.to_string();
        self.prefs.use_dark_theme = false;
        info!(
            background = %background.to_hex(),
            foreground = %foreground.to_hex(),
            "Applied custom theme"
        );
        self.status_message = "Custom theme applied.".to_string();
        self.sync_settings_inputs();
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_hotkey_input_changed(&mut self, index: usize, value: String) {
        if let Some(input) = self.settings.hotkey_inputs.get_mut(index) {
            *input = value;
        }
    }

    pub(super) fn handle_apply_hotkey(&mut self, index: usize, effects: &mut Vec<Effect>) {
        let Some(raw) = self.settings.hotkey_inputs.get(index) else {
            return;
        };
        let Some((modifiers, key)) = hotkeys::parse_chord(raw) else {
            self.status_message = format!("\"{}\" is not a valid key combination.", raw.trim());
            return;
        };
        if let Some(existing) =
            hotkeys::find_conflict(&self.prefs.hotkey_configs, index, modifiers, &key)
        {
            self.status_message = format!(
                "{} is already used by \"{}\".",
                hotkeys::chord_text(modifiers, &key),
                existing.action.description()
            );
            return;
        }
        let Some(config) = self.prefs.hotkey_configs.get_mut(index) else {
            return;
        };
        config.modifiers = modifiers;
        config.key = key;
        let chord = config.display_text();
        info!(action = ?config.action, %chord, "Rebound hotkey");
        self.status_message = format!("{} is now {chord}.", config.action.description());
        self.sync_settings_inputs();
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_toggle_hotkey_enabled(&mut self, index: usize, effects: &mut Vec<Effect>) {
        let Some(candidate) = self.prefs.hotkey_configs.get(index).cloned() else {
            return;
        };
        if !candidate.enabled {
            let conflict = hotkeys::find_conflict(
                &self.prefs.hotkey_configs,
                index,
                candidate.modifiers,
                &candidate.key,
            );
            if let Some(existing) = conflict {
                self.status_message = format!(
                    "{} is already used by \"{}\".",
                    candidate.display_text(),
                    existing.action.description()
                );
                return;
            }
        }
        if let Some(config) = self.prefs.hotkey_configs.get_mut(index) {
            config.enabled = !config.enabled;
        }
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_restore_default_hotkeys(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.hotkey_configs = default_hotkeys();
        self.sync_settings_inputs();
        self.status_message = "Default hotkeys restored.".to_string();
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_preferences_path_changed(&mut self, path: String) {
        self.settings.preferences_path = path;
    }

    fn preferences_transfer_path(&mut self) -> Option<PathBuf> {
        let raw = self.settings.preferences_path.trim().trim_matches('"');
        if raw.is_empty() {
            self.status_message = "Enter a file path for the preferences.".to_string();
            return None;
        }
        Some(PathBuf::from(raw))
    }

    pub(super) fn handle_export_preferences(&mut self, effects: &mut Vec<Effect>) {
        if let Some(path) = self.preferences_transfer_path() {
            effects.push(Effect::ExportPreferences(path));
        }
    }

    pub(super) fn handle_import_preferences(&mut self, effects: &mut Vec<Effect>) {
        if let Some(path) = self.preferences_transfer_path() {
            effects.push(Effect::ImportPreferences(path));
        }
    }

    pub(super) fn handle_preferences_exported(&mut self, result: Result<PathBuf, String>) {
        self.status_message = match result {
            Ok(path) => format!("Preferences exported to {}.", path.display()),
            Err(err) => {
                warn!("Preferences export failed: {err}");
                format!("Export failed: {err}")
            }
        };
    }

    pub(super) fn handle_preferences_imported(
        &mut self,
        result: Result<ReadingPreferences, String>,
        effects: &mut Vec<Effect>,
    ) {
        match result {
            Ok(prefs) => {
                self.apply_preferences(prefs, effects);
                self.status_message = "Preferences imported.".to_string();
            }
            Err(err) => {
                warn!("Preferences import failed: {err}");
                self.status_message = format!("Import failed: {err}");
            }
        }
    }

    pub(super) fn handle_reset_all_preferences(&mut self, effects: &mut Vec<Effect>) {
        match self.prefs_store.reset() {
            Ok(prefs) => {
                self.apply_preferences(prefs, effects);
                self.status_message = "All preferences restored to defaults.".to_string();
            }
            Err(err) => {
                warn!("Failed to reset preferences: {err:#}");
                self.status_message = format!("Reset failed: {err}");
            }
        }
    }

    /// Swap in a whole new preference set, re-syncing window state that
    /// depends on it.
    fn apply_preferences(&mut self, prefs: ReadingPreferences, effects: &mut Vec<Effect>) {
        let old = std::mem::replace(&mut self.prefs, prefs);
        if old.window_topmost != self.prefs.window_topmost {
            effects.push(Effect::SetTopmost(self.prefs.window_topmost));
        }
        if old.immersive_mode_enabled != self.prefs.immersive_mode_enabled
            && self.reader.book_id.is_some()
        {
            effects.push(Effect::SetFullscreen(self.prefs.immersive_mode_enabled));
        }
        self.camouflage.template =
            CamouflageTemplate::from_key(&self.prefs.camouflage_template).unwrap_or_default();
        let offset = self.reader.offset;
        self.reader.set_offset_clamped(offset);
        self.sync_settings_inputs();
    }
}
