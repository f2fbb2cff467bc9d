//! Startup configuration for the reader.
//!
//! Settings that must be known before the window opens live in
//! `conf/config.toml`. Missing or invalid entries fall back to defaults so the
//! UI can still launch. Reading preferences are separate; see
//! [`crate::preferences`].

mod defaults;
mod io;
mod models;
mod tables;

pub use io::load_config;
pub use models::AppConfig;
