use super::super::state::{App, DEFAULT_BOOKMARK_NAME, Section};
use super::Effect;
use crate::pagination;
use tracing::debug;
use uuid::Uuid;

impl App {
    fn move_to(&mut self, offset: usize, effects: &mut Vec<Effect>) {
        let len = self.reader.len();
        let was_before_end = pagination::can_go_next(self.reader.offset, self.page_size(), len);
        self.reader.set_offset_clamped(offset);
        let offset_now = self.reader.offset;
        if let Some(book) = self.reader.book_id.and_then(|id| self.library.get_mut(id)) {
            book.current_offset = offset_now;
            book.total_length = len;
        }
        if was_before_end && !pagination::can_go_next(self.reader.offset, self.page_size(), len) {
            self.stats.record_book_finished();
            effects.push(Effect::SaveStatistics);
        }
        debug!(offset = self.reader.offset, "Moved reading position");
    }

    pub(super) fn handle_next_page(&mut self, effects: &mut Vec<Effect>) {
        let len = self.reader.len();
        if len == 0 {
            return;
        }
        let page_size = self.page_size();
        if !pagination::can_go_next(self.reader.offset, page_size, len) {
            return;
        }
        let next = pagination::next_offset(self.reader.offset, page_size, len);
        self.move_to(next, effects);
    }

    pub(super) fn handle_previous_page(&mut self, effects: &mut Vec<Effect>) {
        if self.reader.len() == 0 || !pagination::can_go_previous(self.reader.offset) {
            return;
        }
        let previous = pagination::previous_offset(self.reader.offset, self.page_size());
        self.move_to(previous, effects);
    }

    pub(super) fn handle_jump_to_beginning(&mut self, effects: &mut Vec<Effect>) {
        if self.reader.len() == 0 {
            return;
        }
        self.move_to(0, effects);
    }

    pub(super) fn handle_jump_to_end(&mut self, effects: &mut Vec<Effect>) {
        let len = self.reader.len();
        if len == 0 {
            return;
        }
        self.move_to(pagination::jump_to_end(self.page_size(), len), effects);
    }

    pub(super) fn handle_next_chapter(&mut self, effects: &mut Vec<Effect>) {
        if self.reader.chapters().is_empty() {
            return;
        }
        // Before the first heading the next chapter is the first one.
        let current = self.reader.current_chapter();
        let next = current.map_or(0, |idx| idx + 1);
        let Some(start) = self
            .reader
            .chapters()
            .get(next)
            .map(|chapter| chapter.start_offset)
        else {
            self.status_message = "Already at the last chapter.".to_string();
            return;
        };
        if current.is_some() {
            self.stats.record_chapter_read();
        }
        self.move_to(start, effects);
    }

    pub(super) fn handle_previous_chapter(&mut self, effects: &mut Vec<Effect>) {
        let Some(current) = self.reader.current_chapter() else {
            if self.reader.offset > 0 && !self.reader.chapters().is_empty() {
                self.move_to(0, effects);
            }
            return;
        };
        let chapters = self.reader.chapters();
        let Some(chapter) = chapters.get(current) else {
            return;
        };
        // Mid-chapter: go back to its heading first.
        let target = if self.reader.offset > chapter.start_offset || current == 0 {
            chapter.start_offset
        } else {
            chapters[current - 1].start_offset
        };
        self.move_to(target, effects);
    }

    pub(super) fn handle_go_to_chapter(&mut self, index: usize, effects: &mut Vec<Effect>) {
        let Some(chapter) = self.reader.chapters().get(index) else {
            return;
        };
        let (start, title) = (chapter.start_offset, chapter.title.clone());
        self.move_to(start, effects);
        self.status_message = format!("Jumped to {title}.");
    }

    pub(super) fn handle_go_to_bookmark(&mut self, bookmark_id: Uuid, effects: &mut Vec<Effect>) {
        let Some(bookmark) = self.current_book().and_then(|book| book.bookmark(bookmark_id)) else {
            return;
        };
        let (offset, name) = (bookmark.offset, bookmark.name.clone());
        self.move_to(offset, effects);
        self.status_message = format!("Jumped to bookmark \"{name}\".");
    }

    pub(super) fn handle_bookmark_name_changed(&mut self, name: String) {
        self.reader.bookmark_name = name;
    }

    pub(super) fn handle_bookmark_note_changed(&mut self, note: String) {
        self.reader.bookmark_note = note;
    }

    pub(super) fn handle_add_bookmark(&mut self, effects: &mut Vec<Effect>) {
        let Some(book_id) = self.reader.book_id else {
            return;
        };
        let offset = self.reader.offset;
        let name = match self.reader.bookmark_name.trim() {
            "" => self
                .reader
                .current_chapter()
                .and_then(|idx| self.reader.chapters().get(idx))
                .map(|chapter| chapter.title.clone())
                .unwrap_or_else(|| DEFAULT_BOOKMARK_NAME.to_string()),
            name => name.to_string(),
        };
        let note = Some(self.reader.bookmark_note.trim().to_string());
        let Some(book) = self.library.get_mut(book_id) else {
            return;
        };
        book.add_bookmark(name.clone(), offset, note);
        self.reader.bookmark_name.clear();
        self.reader.bookmark_note.clear();
        self.status_message = format!("Bookmark \"{name}\" added.");
        effects.push(Effect::SaveLibrary);
    }

    pub(super) fn handle_remove_bookmark(&mut self, bookmark_id: Uuid, effects: &mut Vec<Effect>) {
        let Some(book_id) = self.reader.book_id else {
            return;
        };
        let removed = self
            .library
            .get_mut(book_id)
            .and_then(|book| book.remove_bookmark(bookmark_id));
        if let Some(bookmark) = removed {
            self.status_message = format!("Bookmark \"{}\" removed.", bookmark.name);
            effects.push(Effect::SaveLibrary);
        }
    }

    /// Persist the current position. `quiet` skips the status line.
    pub(super) fn save_progress(&mut self, quiet: bool, effects: &mut Vec<Effect>) {
        let Some(book_id) = self.reader.book_id else {
            return;
        };
        let len = self.reader.len();
        let offset = self.reader.offset;
        if let Some(book) = self.library.get_mut(book_id) {
            book.set_position(offset, len);
        }
        if !quiet {
            self.status_message = "Progress saved.".to_string();
        }
        effects.push(Effect::SaveLibrary);
    }

    pub(super) fn handle_back_to_bookshelf(&mut self, effects: &mut Vec<Effect>) {
        if self.reader.book_id.is_none() {
            self.section = Section::Bookshelf;
            return;
        }
        self.finish_session(effects);
        self.reader.close();
        self.library.sort_by_recent();
        self.section = Section::Bookshelf;
        if self.prefs.immersive_mode_enabled {
            effects.push(Effect::SetFullscreen(false));
        }
        self.status_message = format!("Bookshelf ({} books).", self.library.len());
    }

    pub(super) fn handle_auto_page_tick(&mut self, effects: &mut Vec<Effect>) {
        if !self.prefs.auto_page_enabled
            || self.section != Section::Reader
            || self.camouflage.active
        {
            return;
        }
        if pagination::can_go_next(self.reader.offset, self.page_size(), self.reader.len()) {
            self.handle_next_page(effects);
        } else {
            self.prefs.auto_page_enabled = false;
            self.status_message = "Reached the end; auto page turned off.".to_string();
            effects.push(Effect::SavePreferences);
        }
    }
}
