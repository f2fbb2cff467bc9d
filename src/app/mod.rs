mod messages;
mod state;
mod update;
mod view;

pub use state::StartupData;

use crate::config::AppConfig;
use iced::{Size, window};
use state::App;

const MIN_WINDOW_SIZE: Size = Size::new(640.0, 480.0);

/// Launch the reader window with everything loaded at startup.
pub fn run_app(startup: StartupData, config: AppConfig) -> iced::Result {
    let level = if startup.prefs.window_topmost {
        window::Level::AlwaysOnTop
    } else {
        window::Level::Normal
    };
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        min_size: Some(MIN_WINDOW_SIZE),
        level,
        // Closing goes through `Message::CloseRequested` so the session is saved.
        exit_on_close_request: false,
        ..window::Settings::default()
    };

    iced::application(App::title, App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(App::iced_theme)
        .run_with(move || App::bootstrap(startup, config))
}
