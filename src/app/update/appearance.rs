use super::super::state::{App, Section};
use super::Effect;
use crate::pagination::{self, PAGE_SIZE_STEP};
use crate::preferences::{MAX_AUTO_PAGE_SECS, MAX_COLUMNS, MIN_AUTO_PAGE_SECS, MIN_COLUMNS};
use crate::theme::{self, DAY_THEME, NIGHT_THEME};
use tracing::{debug, info};

impl App {
    pub(super) fn handle_font_size_step(&mut self, delta: i32, effects: &mut Vec<Effect>) {
        let requested = self.prefs.font_size.saturating_add_signed(delta);
        let before = self.prefs.font_size;
        self.prefs.set_font_size(requested);
        if self.prefs.font_size != before {
            debug!(old = before, new = self.prefs.font_size, "Font size changed");
            self.status_message = format!("Font size {}.", self.prefs.font_size);
            effects.push(Effect::SavePreferences);
        }
    }

    pub(super) fn handle_page_size_step(&mut self, grow: bool, effects: &mut Vec<Effect>) {
        let current = self.page_size();
        let requested = if grow {
            current + PAGE_SIZE_STEP
        } else {
            current.saturating_sub(PAGE_SIZE_STEP)
        };
        let next = pagination::clamp_page_size(requested);
        if next == current {
            return;
        }
        self.prefs.page_size = next;
        // Keep the window inside the text after a resize.
        let offset = self.reader.offset;
        self.reader.set_offset_clamped(offset);
        debug!(page_size = next, "Page size changed");
        self.status_message = format!("{next} characters per page.");
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_reset_reader_preferences(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.reset_reader_layout();
        self.status_message = "Reading parameters reset.".to_string();
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.use_dark_theme = !self.prefs.use_dark_theme;
        // A day/night flip drops back to the base palette of that mode.
        self.prefs.selected_theme_name = if self.prefs.use_dark_theme {
            NIGHT_THEME.to_string()
        } else {
            DAY_THEME.to_string()
        };
        info!(night_mode = self.prefs.use_dark_theme, "Toggled theme");
        self.status_message = if self.prefs.use_dark_theme {
            "Switched to night mode.".to_string()
        } else {
            "Switched to day mode.".to_string()
        };
        self.sync_settings_inputs();
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_select_theme(&mut self, name: String, effects: &mut Vec<Effect>) {
        let custom_name = self
            .prefs
            .custom_theme
            .as_ref()
            .filter(|custom| custom.name == name)
            .map(|custom| custom.name.clone());
        let Some(selected) = theme::preset(&name)
            .map(|preset| preset.name)
            .or(custom_name)
        else {
            self.status_message = format!("Unknown theme \"{name}\".");
            return;
        };
        self.prefs.use_dark_theme = selected == NIGHT_THEME;
        info!(theme = %selected, "Selected reading theme");
        self.status_message = format!("Theme: {selected}.");
        self.prefs.selected_theme_name = selected;
        self.sync_settings_inputs();
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_toggle_immersive(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.immersive_mode_enabled = !self.prefs.immersive_mode_enabled;
        let enabled = self.prefs.immersive_mode_enabled;
        info!(enabled, "Toggled immersive mode");
        if self.section == Section::Reader {
            effects.push(Effect::SetFullscreen(enabled));
        }
        self.status_message = if enabled {
            "Immersive mode on.".to_string()
        } else {
            "Immersive mode off.".to_string()
        };
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_toggle_chapter_panel(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.show_chapter_panel = !self.prefs.show_chapter_panel;
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_toggle_bookmark_panel(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.show_bookmark_panel = !self.prefs.show_bookmark_panel;
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_toggle_statistics_panel(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.show_statistics_panel = !self.prefs.show_statistics_panel;
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_toggle_auto_page(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.auto_page_enabled = !self.prefs.auto_page_enabled;
        self.status_message = if self.prefs.auto_page_enabled {
            format!(
                "Auto page every {} seconds.",
                self.prefs.auto_page_interval
            )
        } else {
            "Auto page off.".to_string()
        };
        effects.push(Effect::SavePreferences);
    }

    pub(super) fn handle_auto_page_interval_changed(
        &mut self,
        seconds: u64,
        effects: &mut Vec<Effect>,
    ) {
        let clamped = seconds.clamp(MIN_AUTO_PAGE_SECS, MAX_AUTO_PAGE_SECS);
        if clamped != self.prefs.auto_page_interval {
            self.prefs.auto_page_interval = clamped;
            effects.push(Effect::SavePreferences);
        }
    }

    pub(super) fn handle_column_count_changed(&mut self, columns: u8, effects: &mut Vec<Effect>) {
        let clamped = columns.clamp(MIN_COLUMNS, MAX_COLUMNS);
        if clamped != self.prefs.column_count {
            self.prefs.column_count = clamped;
            effects.push(Effect::SavePreferences);
        }
    }

    pub(super) fn handle_toggle_topmost(&mut self, effects: &mut Vec<Effect>) {
        self.prefs.window_topmost = !self.prefs.window_topmost;
        effects.push(Effect::SetTopmost(self.prefs.window_topmost));
        effects.push(Effect::SavePreferences);
    }
}
