use super::super::super::messages::Message;
use super::super::super::state::{App, OpenedBook};
use super::super::Effect;
use crate::chapters::extract_chapters;
use crate::document::Document;
use crate::preferences::{PreferencesStore, ReadingPreferences};
use crate::text_loader::load_text;
use anyhow::{Context, Result};
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::window;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveLibrary => {
                self.persist_library();
                Task::none()
            }
            Effect::SavePreferences => {
                self.persist_preferences();
                Task::none()
            }
            Effect::SaveStatistics => {
                self.persist_statistics();
                Task::none()
            }
            Effect::LoadBook { book_id, path } => Task::perform(
                async move {
                    match read_book(&path) {
                        Ok(opened) => Message::BookLoaded {
                            book_id,
                            opened: Arc::new(opened),
                        },
                        Err(err) => Message::BookLoadFailed {
                            book_id,
                            error: format!("{err:#}"),
                        },
                    }
                },
                |message| message,
            ),
            Effect::ExportPreferences(path) => {
                let store = self.prefs_store.clone();
                let prefs = self.prefs.clone();
                Task::perform(
                    async move {
                        export_preferences(&store, &prefs, &path)
                            .map(|()| path)
                            .map_err(|err| format!("{err:#}"))
                    },
                    Message::PreferencesExported,
                )
            }
            Effect::ImportPreferences(path) => {
                let store = self.prefs_store.clone();
                Task::perform(
                    async move { import_preferences(&store, &path).map_err(|err| format!("{err:#}")) },
                    Message::PreferencesImported,
                )
            }
            Effect::MinimizeWindow => {
                window::get_latest().and_then(|id| window::minimize(id, true))
            }
            Effect::SetFullscreen(enabled) => {
                let mode = if enabled {
                    window::Mode::Fullscreen
                } else {
                    window::Mode::Windowed
                };
                window::get_latest().and_then(move |id| window::change_mode(id, mode))
            }
            Effect::SetTopmost(enabled) => {
                let level = if enabled {
                    window::Level::AlwaysOnTop
                } else {
                    window::Level::Normal
                };
                window::get_latest().and_then(move |id| window::change_level(id, level))
            }
            Effect::Quit => {
                info!("Shutting down");
                iced::exit()
            }
        }
    }

    fn persist_library(&mut self) {
        if let Err(err) = self.library_store.save(self.library.books()) {
            warn!("Failed to save library: {err:#}");
            self.status_message = format!("Could not save the bookshelf: {err}");
        }
    }

    fn persist_preferences(&mut self) {
        if let Err(err) = self.prefs_store.save(&self.prefs) {
            warn!("Failed to save preferences: {err:#}");
            self.status_message = format!("Could not save preferences: {err}");
        }
    }

    fn persist_statistics(&mut self) {
        if let Err(err) = self.prefs_store.save_statistics(&self.stats) {
            warn!("Failed to save statistics: {err:#}");
            self.status_message = format!("Could not save statistics: {err}");
        }
    }
}

/// Decode a novel and split it into chapters.
fn read_book(path: &Path) -> Result<OpenedBook> {
    let loaded = load_text(path)?;
    let document = Document::new(loaded.content);
    let chapters = extract_chapters(&document);
    Ok(OpenedBook {
        document,
        chapters,
        encoding: loaded.encoding,
    })
}

fn export_preferences(
    store: &PreferencesStore,
    prefs: &ReadingPreferences,
    path: &Path,
) -> Result<()> {
    let json = store.export(prefs)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Exported preferences");
    Ok(())
}

fn import_preferences(store: &PreferencesStore, path: &Path) -> Result<ReadingPreferences> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    store.import(&json)
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    match event {
        Event::Window(window::Event::CloseRequested) => Some(Message::CloseRequested),
        _ if status == event::Status::Captured => None,
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_book_decodes_and_splits() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.txt");
        std::fs::write(&path, "第1章 起\n内容\n第2章 承\n内容\n").unwrap();

        let opened = read_book(&path).unwrap();
        assert_eq!(opened.encoding, "UTF-8");
        assert_eq!(opened.chapters.len(), 2);
        assert_eq!(opened.chapters[1].title, "第2章 承");
    }

    #[test]
    fn read_book_reports_missing_files() {
        let dir = TempDir::new().unwrap();
        let err = read_book(&dir.path().join("gone.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("File not found"));
    }

    #[test]
    fn preferences_survive_export_and_import() {
        let dir = TempDir::new().unwrap();
        let store = PreferencesStore::new(dir.path());
        let mut prefs = ReadingPreferences::default();
        prefs.page_size = 2000;
        let path = dir.path().join("out").join("prefs.json");

        export_preferences(&store, &prefs, &path).unwrap();
        let imported = import_preferences(&store, &path).unwrap();
        assert_eq!(imported.page_size, 2000);
        assert_eq!(store.load().page_size, 2000);
    }
}
