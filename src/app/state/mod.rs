mod constants;
mod reader;
mod ui;

use crate::config::AppConfig;
use crate::library::{Book, Library, LibraryStore};
use crate::pagination;
use crate::preferences::{PreferencesStore, ReadingPreferences};
use crate::reading_timer::ReadingTimer;
use crate::statistics::ReadingStatistics;
use crate::theme::{self, ReadingTheme};
use iced::{Task, Theme};
use std::path::PathBuf;
use tracing::info;

use super::messages::Message;

pub(crate) use constants::*;
pub use reader::OpenedBook;
pub(in crate::app) use reader::ReaderState;
pub(in crate::app) use ui::{CamouflageState, Section, SettingsState, ShelfState};

/// Everything read from disk before the window opens.
pub struct StartupData {
    pub library: Library,
    pub prefs: ReadingPreferences,
    pub stats: ReadingStatistics,
    /// Novel named on the command line.
    pub open_path: Option<PathBuf>,
}

impl StartupData {
    pub fn load(config: &AppConfig, open_path: Option<PathBuf>) -> Self {
        let data_dir = config.data_dir();
        let prefs_store = PreferencesStore::new(&data_dir);
        let library = LibraryStore::new(&data_dir).load();
        let prefs = prefs_store.load();
        let stats = prefs_store.load_statistics();
        info!(
            dir = %data_dir.display(),
            books = library.len(),
            "Loaded reader data"
        );
        StartupData {
            library,
            prefs,
            stats,
            open_path,
        }
    }
}

/// Core application state composed of sub-models.
pub struct App {
    pub(super) section: Section,
    pub(super) config: AppConfig,
    pub(super) prefs: ReadingPreferences,
    pub(super) library: Library,
    pub(super) stats: ReadingStatistics,
    pub(super) library_store: LibraryStore,
    pub(super) prefs_store: PreferencesStore,
    pub(super) shelf: ShelfState,
    pub(super) reader: ReaderState,
    pub(super) timer: ReadingTimer,
    pub(super) camouflage: CamouflageState,
    pub(super) settings: SettingsState,
    pub(super) status_message: String,
}

impl App {
    pub(super) fn new(startup: StartupData, config: AppConfig) -> App {
        let data_dir = config.data_dir();
        let camouflage = CamouflageState::with_template(&startup.prefs.camouflage_template);
        let mut app = App {
            section: Section::Bookshelf,
            prefs: startup.prefs,
            library: startup.library,
            stats: startup.stats,
            library_store: LibraryStore::new(&data_dir),
            prefs_store: PreferencesStore::new(&data_dir),
            config,
            shelf: ShelfState::default(),
            reader: ReaderState::default(),
            timer: ReadingTimer::new(),
            camouflage,
            settings: SettingsState::default(),
            status_message: String::new(),
        };
        app.sync_settings_inputs();
        app
    }

    pub(super) fn bootstrap(startup: StartupData, config: AppConfig) -> (App, Task<Message>) {
        let open_path = startup.open_path.clone();
        let mut app = App::new(startup, config);
        let effects = app.initialize(open_path);
        let tasks: Vec<Task<Message>> = effects
            .into_iter()
            .map(|effect| app.run_effect(effect))
            .collect();
        (app, Task::batch(tasks))
    }

    pub(super) fn title(&self) -> String {
        if self.camouflage.active {
            return self.camouflage.template.window_title().to_string();
        }
        match self.current_book() {
            Some(book) if self.section == Section::Reader => format!("{} - YuYue", book.title),
            _ => "YuYue Reader".to_string(),
        }
    }

    pub(super) fn reading_theme(&self) -> ReadingTheme {
        theme::resolve(
            &self.prefs.selected_theme_name,
            self.prefs.use_dark_theme,
            self.prefs.custom_theme.as_ref(),
        )
    }

    pub(super) fn iced_theme(&self) -> Theme {
        Theme::from(&self.reading_theme())
    }

    pub(super) fn current_book(&self) -> Option<&Book> {
        self.reader.book_id.and_then(|id| self.library.get(id))
    }

    pub(super) fn page_size(&self) -> usize {
        pagination::clamp_page_size(self.prefs.page_size)
    }

    /// Refresh editable text fields from the stored preferences.
    pub(super) fn sync_settings_inputs(&mut self) {
        self.settings.hotkey_inputs = self
            .prefs
            .hotkey_configs
            .iter()
            .map(|config| config.display_text())
            .collect();
        let custom = self
            .prefs
            .custom_theme
            .clone()
            .map(|custom| custom.to_reading_theme())
            .unwrap_or_else(|| self.reading_theme());
        self.settings.custom_background = custom.background.to_hex();
        self.settings.custom_foreground = custom.foreground.to_hex();
        if self.settings.preferences_path.is_empty() {
            self.settings.preferences_path = self
                .config
                .data_dir()
                .join(EXPORT_FILE_NAME)
                .display()
                .to_string();
        }
    }
}
