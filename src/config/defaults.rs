use super::models::LogLevel;
use std::path::PathBuf;

pub(crate) const DATA_DIR_NAME: &str = "YuYue";

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Info
}

pub(crate) fn default_window_width() -> f32 {
    1100.0
}

pub(crate) fn default_window_height() -> f32 {
    760.0
}

pub(crate) fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
