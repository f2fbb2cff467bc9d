//! Entry point for the YuYue novel reader.
//!
//! Startup is kept small:
//! - Read `conf/config.toml` and apply its log level.
//! - Load the bookshelf, preferences and statistics from the data directory.
//! - Launch the GUI, optionally importing a `.txt` path given on the command line.

mod app;
mod camouflage;
mod chapters;
mod config;
mod document;
mod hotkeys;
mod library;
mod pagination;
mod preferences;
mod reading_timer;
mod statistics;
mod text_loader;
mod theme;

use crate::app::{StartupData, run_app};
use crate::config::load_config;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const CONFIG_PATH: &str = "conf/config.toml";

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config = load_config(Path::new(CONFIG_PATH));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    let open_path = parse_args();
    info!(
        data_dir = %config.data_dir().display(),
        level = %config.log_level,
        "Starting YuYue reader"
    );

    let startup = StartupData::load(&config, open_path);
    run_app(startup, config).context("Failed to start the GUI")?;
    Ok(())
}

/// Optional novel path; a missing file is reported in the app instead.
fn parse_args() -> Option<PathBuf> {
    let path = env::args_os().nth(1).map(PathBuf::from)?;
    info!(path = %path.display(), "Novel requested on the command line");
    Some(path)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
