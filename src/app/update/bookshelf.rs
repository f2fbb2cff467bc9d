use super::super::state::{App, OpenedBook, Section};
use super::Effect;
use crate::library::ImportOutcome;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

impl App {
    /// Startup: order the shelf, pick the first book and optionally reopen it.
    pub(in crate::app) fn initialize(&mut self, open_path: Option<PathBuf>) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.library.sort_by_recent();
        self.shelf.selected = self.library.first().map(|book| book.id);
        self.status_message = if self.library.is_empty() {
            "Bookshelf is empty. Import a local .txt file to start reading.".to_string()
        } else {
            format!("Loaded {} books.", self.library.len())
        };

        if let Some(path) = open_path {
            self.import_path(path, &mut effects);
        } else if self.prefs.auto_resume_last_book {
            if let Some(book_id) = self.shelf.selected {
                self.reader.resuming = true;
                self.request_open(book_id, &mut effects);
            }
        }
        effects
    }

    pub(super) fn handle_import_path_changed(&mut self, path: String) {
        self.shelf.path_input = path;
    }

    pub(super) fn handle_import_requested(&mut self, effects: &mut Vec<Effect>) {
        let raw = self.shelf.path_input.trim().trim_matches('"').to_string();
        if raw.is_empty() {
            self.status_message = "Enter the path of a .txt file to import.".to_string();
            return;
        }
        self.import_path(PathBuf::from(raw), effects);
    }

    fn import_path(&mut self, path: PathBuf, effects: &mut Vec<Effect>) {
        if !path.is_file() {
            warn!(path = %path.display(), "Import target missing");
            self.status_message = "File does not exist or cannot be accessed.".to_string();
            return;
        }
        match self.library.import(path) {
            ImportOutcome::AlreadyPresent(book_id) => {
                if let Some(book) = self.library.get(book_id) {
                    self.status_message =
                        format!("\"{}\" is already on the shelf; opening it.", book.title);
                }
                self.request_open(book_id, effects);
            }
            ImportOutcome::Added(book_id) => {
                if let Some(book) = self.library.get(book_id) {
                    self.status_message = format!("Imported \"{}\".", book.title);
                }
                self.shelf.path_input.clear();
                effects.push(Effect::SaveLibrary);
                self.request_open(book_id, effects);
            }
        }
    }

    pub(super) fn handle_select_book(&mut self, book_id: Uuid) {
        if self.library.get(book_id).is_some() {
            self.shelf.selected = Some(book_id);
        }
    }

    pub(super) fn handle_open_selected_book(&mut self, effects: &mut Vec<Effect>) {
        match self.shelf.selected {
            Some(book_id) => self.request_open(book_id, effects),
            None => self.status_message = "Select a book first.".to_string(),
        }
    }

    /// Start loading a shelved book; the text arrives as `BookLoaded`.
    pub(super) fn request_open(&mut self, book_id: Uuid, effects: &mut Vec<Effect>) {
        let Some(path) = self.library.get(book_id).map(|book| book.file_path.clone()) else {
            return;
        };
        if self.reader.book_id.is_some() {
            self.finish_session(effects);
            self.reader.close();
            self.section = Section::Bookshelf;
        }
        self.shelf.selected = Some(book_id);
        self.reader.loading = Some(book_id);
        info!(path = %path.display(), "Opening book");
        effects.push(Effect::LoadBook { book_id, path });
    }

    pub(super) fn handle_book_loaded(
        &mut self,
        book_id: Uuid,
        opened: Arc<OpenedBook>,
        effects: &mut Vec<Effect>,
    ) {
        if self.reader.loading != Some(book_id) {
            return;
        }
        self.reader.loading = None;
        let resuming = std::mem::take(&mut self.reader.resuming);
        let len = opened.document.len();
        let empty = opened.document.is_empty();
        let Some(book) = self.library.get_mut(book_id) else {
            return;
        };

        let offset = crate::pagination::restore_offset(book.current_offset, len);
        book.set_position(offset, len);
        book.chapters = opened.chapters.clone();
        let title = book.title.clone();
        let carried_minutes = book.reading_minutes;

        info!(
            title = %title,
            encoding = opened.encoding,
            chars = len,
            chapters = opened.chapters.len(),
            offset,
            "Book ready"
        );

        self.reader.book_id = Some(book_id);
        self.reader.opened = Some(opened);
        self.reader.offset = offset;
        self.reader.session_start_offset = offset;
        self.section = Section::Reader;
        self.library.sort_by_recent();

        if self.prefs.enable_reading_timer {
            self.timer.start(carried_minutes);
        }
        if self.prefs.immersive_mode_enabled {
            effects.push(Effect::SetFullscreen(true));
        }
        self.status_message = if empty {
            format!("\"{title}\" contains no text.")
        } else if resuming {
            format!("Resumed \"{title}\".")
        } else {
            format!("Reading \"{title}\".")
        };
        effects.push(Effect::SaveLibrary);
    }

    pub(super) fn handle_book_load_failed(&mut self, book_id: Uuid, error: String) {
        if self.reader.loading != Some(book_id) {
            return;
        }
        self.reader.loading = None;
        self.reader.resuming = false;
        warn!(%book_id, "Failed to open book: {error}");
        self.status_message = format!("Failed to open: {error}");
    }

    pub(super) fn handle_delete_selected_book(&mut self, effects: &mut Vec<Effect>) {
        let Some(book_id) = self.shelf.selected else {
            self.status_message = "Select a book first.".to_string();
            return;
        };
        if self.reader.book_id == Some(book_id) {
            self.finish_session(effects);
            self.reader.close();
        }
        if self.reader.loading == Some(book_id) {
            self.reader.loading = None;
        }
        if let Some(removed) = self.library.remove(book_id) {
            info!(title = %removed.title, "Removed book from shelf");
            self.status_message = format!("Removed \"{}\" from the shelf.", removed.title);
            effects.push(Effect::SaveLibrary);
        }
        self.shelf.selected = self.library.first().map(|book| book.id);
    }
}
