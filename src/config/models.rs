use super::defaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Startup configuration; flattened view of `conf/config.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_level: LogLevel,
    /// Overrides the per-user data directory when set.
    pub data_dir: Option<PathBuf>,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: defaults::default_log_level(),
            data_dir: None,
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
        }
    }
}

impl AppConfig {
    /// Directory holding `library.json`, `preferences.json` and
    /// `statistics.json`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(defaults::default_data_dir)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
