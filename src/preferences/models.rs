use super::defaults;
use crate::hotkeys::{self, HotkeyConfig, merge_with_defaults};
use crate::pagination::{clamp_font_size, clamp_page_size, line_height_for};
use crate::theme::{self, CustomTheme};
use serde::{Deserialize, Serialize};

pub const MIN_COLUMNS: u8 = 1;
pub const MAX_COLUMNS: u8 = 3;
pub const MIN_AUTO_PAGE_SECS: u64 = 3;
pub const MAX_AUTO_PAGE_SECS: u64 = 120;
const MIN_AUTO_SAVE_SECS: u64 = 5;

/// Everything the user can tune about reading; persisted as
/// `preferences.json`. PascalCase aliases accept files written by the
/// Windows build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingPreferences {
    #[serde(default = "defaults::default_font_size", alias = "FontSize")]
    pub font_size: u32,
    #[serde(default = "defaults::default_line_height", alias = "LineHeight")]
    pub line_height: f32,
    #[serde(
        default = "defaults::default_paragraph_spacing",
        alias = "ParagraphSpacing"
    )]
    pub paragraph_spacing: f32,
    #[serde(default = "defaults::default_true", alias = "EnableFirstLineIndent")]
    pub enable_first_line_indent: bool,
    #[serde(
        default = "defaults::default_first_line_indent",
        alias = "FirstLineIndent"
    )]
    pub first_line_indent: f32,
    #[serde(default = "defaults::default_column_count", alias = "ColumnCount")]
    pub column_count: u8,
    #[serde(default = "defaults::default_page_size", alias = "PageSize")]
    pub page_size: usize,
    #[serde(default = "defaults::default_theme_name", alias = "SelectedThemeName")]
    pub selected_theme_name: String,
    #[serde(default, alias = "UseDarkTheme")]
    pub use_dark_theme: bool,
    #[serde(
        default,
        alias = "CustomTheme",
        deserialize_with = "theme::lenient_custom_theme"
    )]
    pub custom_theme: Option<CustomTheme>,
    #[serde(default, alias = "AutoPageEnabled")]
    pub auto_page_enabled: bool,
    #[serde(
        default = "defaults::default_auto_page_interval",
        alias = "AutoPageInterval"
    )]
    pub auto_page_interval: u64,
    #[serde(default, alias = "ImmersiveModeEnabled")]
    pub immersive_mode_enabled: bool,
    #[serde(default, alias = "ShowChapterPanel")]
    pub show_chapter_panel: bool,
    #[serde(default, alias = "ShowBookmarkPanel")]
    pub show_bookmark_panel: bool,
    #[serde(default, alias = "ShowStatisticsPanel")]
    pub show_statistics_panel: bool,
    #[serde(default, alias = "WindowTopmost")]
    pub window_topmost: bool,
    #[serde(default = "defaults::default_window_opacity", alias = "WindowOpacity")]
    pub window_opacity: f32,
    #[serde(default = "defaults::default_true", alias = "BorderlessMode")]
    pub borderless_mode: bool,
    #[serde(default = "defaults::default_true", alias = "AutoResumeLastBook")]
    pub auto_resume_last_book: bool,
    #[serde(default = "defaults::default_true", alias = "AutoSaveProgress")]
    pub auto_save_progress: bool,
    #[serde(
        default = "defaults::default_auto_save_interval",
        alias = "AutoSaveInterval"
    )]
    pub auto_save_interval: u64,
    #[serde(default = "defaults::default_true", alias = "EnableReadingTimer")]
    pub enable_reading_timer: bool,
    #[serde(default = "defaults::default_true", alias = "ShowReadingStatistics")]
    pub show_reading_statistics: bool,
    #[serde(
        default = "defaults::default_hotkey_configs",
        alias = "HotkeyConfigs",
        deserialize_with = "hotkeys::lenient_hotkey_list"
    )]
    pub hotkey_configs: Vec<HotkeyConfig>,
    #[serde(default, alias = "AutoStartEnabled")]
    pub auto_start_enabled: bool,
    /// Key of the disguise raised by the boss key.
    #[serde(
        default = "defaults::default_camouflage_template",
        alias = "CamouflageTemplate"
    )]
    pub camouflage_template: String,
}

impl Default for ReadingPreferences {
    fn default() -> Self {
        ReadingPreferences {
            font_size: defaults::default_font_size(),
            line_height: defaults::default_line_height(),
            paragraph_spacing: defaults::default_paragraph_spacing(),
            enable_first_line_indent: true,
            first_line_indent: defaults::default_first_line_indent(),
            column_count: defaults::default_column_count(),
            page_size: defaults::default_page_size(),
            selected_theme_name: defaults::default_theme_name(),
            use_dark_theme: false,
            custom_theme: None,
            auto_page_enabled: false,
            auto_page_interval: defaults::default_auto_page_interval(),
            immersive_mode_enabled: false,
            show_chapter_panel: false,
            show_bookmark_panel: false,
            show_statistics_panel: false,
            window_topmost: false,
            window_opacity: defaults::default_window_opacity(),
            borderless_mode: true,
            auto_resume_last_book: true,
            auto_save_progress: true,
            auto_save_interval: defaults::default_auto_save_interval(),
            enable_reading_timer: true,
            show_reading_statistics: true,
            hotkey_configs: defaults::default_hotkey_configs(),
            auto_start_enabled: false,
            camouflage_template: defaults::default_camouflage_template(),
        }
    }
}

impl ReadingPreferences {
    /// Pull every value back into the range the UI can display.
    pub fn normalized(mut self) -> Self {
        self.font_size = clamp_font_size(self.font_size);
        let min_line_height = self.font_size as f32 + 4.0;
        if !self.line_height.is_finite() || self.line_height < min_line_height {
            self.line_height = line_height_for(self.font_size);
        }
        self.page_size = clamp_page_size(self.page_size);
        self.column_count = self.column_count.clamp(MIN_COLUMNS, MAX_COLUMNS);
        self.auto_page_interval = self
            .auto_page_interval
            .clamp(MIN_AUTO_PAGE_SECS, MAX_AUTO_PAGE_SECS);
        self.auto_save_interval = self.auto_save_interval.max(MIN_AUTO_SAVE_SECS);
        if !self.window_opacity.is_finite() {
            self.window_opacity = defaults::default_window_opacity();
        }
        self.window_opacity = self.window_opacity.clamp(0.2, 1.0);
        self.hotkey_configs = merge_with_defaults(std::mem::take(&mut self.hotkey_configs));
        self
    }

    /// Set the font size and keep the line height proportional.
    pub fn set_font_size(&mut self, font_size: u32) {
        self.font_size = clamp_font_size(font_size);
        self.line_height = line_height_for(self.font_size);
    }

    /// Restore the typography and layout settings, keeping everything else.
    pub fn reset_reader_layout(&mut self) {
        let defaults = ReadingPreferences::default();
        self.font_size = defaults.font_size;
        self.line_height = defaults.line_height;
        self.paragraph_spacing = defaults.paragraph_spacing;
        self.enable_first_line_indent = defaults.enable_first_line_indent;
        self.first_line_indent = defaults.first_line_indent;
        self.column_count = defaults.column_count;
        self.page_size = defaults.page_size;
    }
}
