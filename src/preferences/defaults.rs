use crate::camouflage::CamouflageTemplate;
use crate::hotkeys::{HotkeyConfig, default_hotkeys};
use crate::pagination::{DEFAULT_FONT_SIZE, DEFAULT_PAGE_SIZE};
use crate::theme::DAY_THEME;

pub(crate) fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

pub(crate) fn default_line_height() -> f32 {
    26.0
}

pub(crate) fn default_paragraph_spacing() -> f32 {
    8.0
}

pub(crate) fn default_first_line_indent() -> f32 {
    32.0
}

pub(crate) fn default_column_count() -> u8 {
    1
}

pub(crate) fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

pub(crate) fn default_theme_name() -> String {
    DAY_THEME.to_string()
}

pub(crate) fn default_auto_page_interval() -> u64 {
    10
}

pub(crate) fn default_window_opacity() -> f32 {
    0.95
}

pub(crate) fn default_auto_save_interval() -> u64 {
    30
}

pub(crate) fn default_hotkey_configs() -> Vec<HotkeyConfig> {
    default_hotkeys()
}

pub(crate) fn default_camouflage_template() -> String {
    CamouflageTemplate::default().key().to_string()
}

pub(crate) fn default_true() -> bool {
    true
}
