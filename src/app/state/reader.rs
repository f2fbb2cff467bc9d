use crate::chapters::chapter_index_at;
use crate::document::Document;
use crate::library::Chapter;
use crate::pagination;
use std::sync::Arc;
use uuid::Uuid;

/// Decoded text and chapter table produced off the UI thread.
#[derive(Debug)]
pub struct OpenedBook {
    pub document: Document,
    pub chapters: Vec<Chapter>,
    pub encoding: &'static str,
}

/// Reader-related model.
#[derive(Default)]
pub struct ReaderState {
    pub(in crate::app) book_id: Option<Uuid>,
    pub(in crate::app) opened: Option<Arc<OpenedBook>>,
    pub(in crate::app) offset: usize,
    /// Offset when the current reading session began.
    pub(in crate::app) session_start_offset: usize,
    pub(in crate::app) loading: Option<Uuid>,
    pub(in crate::app) resuming: bool,
    pub(in crate::app) bookmark_name: String,
    pub(in crate::app) bookmark_note: String,
}

impl ReaderState {
    pub(in crate::app) fn len(&self) -> usize {
        self.opened.as_ref().map_or(0, |opened| opened.document.len())
    }

    pub(in crate::app) fn chapters(&self) -> &[Chapter] {
        self.opened
            .as_ref()
            .map(|opened| opened.chapters.as_slice())
            .unwrap_or(&[])
    }

    pub(in crate::app) fn current_chapter(&self) -> Option<usize> {
        chapter_index_at(self.chapters(), self.offset)
    }

    /// Text of the page at the current offset, snapping the offset back when
    /// it points past the end.
    pub(in crate::app) fn page_text(&self, page_size: usize) -> &str {
        let Some(opened) = self.opened.as_ref() else {
            return "";
        };
        let (start, len) = pagination::page_window(self.offset, page_size, opened.document.len());
        opened.document.slice(start, len)
    }

    pub(in crate::app) fn set_offset_clamped(&mut self, offset: usize) {
        self.offset = offset.min(pagination::last_offset(self.len()));
    }

    pub(in crate::app) fn close(&mut self) {
        self.book_id = None;
        self.opened = None;
        self.offset = 0;
        self.session_start_offset = 0;
        self.bookmark_name.clear();
        self.bookmark_note.clear();
    }
}
