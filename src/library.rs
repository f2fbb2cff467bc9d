//! Local bookshelf: book records and their JSON persistence.
//!
//! The whole library is stored as one JSON array in `library.json` under the
//! data directory. Loading never fails: a missing file yields an empty shelf
//! and a corrupt one is logged and replaced by an empty shelf on next save.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const LIBRARY_FILE_NAME: &str = "library.json";
const UNTITLED_BOOK: &str = "Untitled Novel";

/// A chapter boundary inside a book, in character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub start_offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: Uuid,
    pub name: String,
    pub offset: usize,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_utc: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    pub file_path: PathBuf,
    #[serde(default = "Utc::now")]
    pub last_opened_utc: DateTime<Utc>,
    #[serde(default)]
    pub current_offset: usize,
    #[serde(default)]
    pub total_length: usize,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub reading_minutes: u64,
}

impl Book {
    pub fn new(file_path: PathBuf) -> Self {
        let title = file_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().trim().to_string())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| UNTITLED_BOOK.to_string());
        Book {
            id: Uuid::new_v4(),
            title,
            author: None,
            file_path,
            last_opened_utc: Utc::now(),
            current_offset: 0,
            total_length: 0,
            chapters: Vec::new(),
            bookmarks: Vec::new(),
            reading_minutes: 0,
        }
    }

    /// Fraction read in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.total_length == 0 {
            return 0.0;
        }
        (self.current_offset as f64 / self.total_length as f64).clamp(0.0, 1.0)
    }

    /// Record a reading position, keeping it inside the text.
    pub fn set_position(&mut self, offset: usize, total_length: usize) {
        self.total_length = total_length;
        self.current_offset = offset.min(total_length);
        self.last_opened_utc = Utc::now();
    }

    /// Add a bookmark, keeping the list ordered by offset. Returns its id.
    pub fn add_bookmark(&mut self, name: String, offset: usize, note: Option<String>) -> Uuid {
        let bookmark = Bookmark {
            id: Uuid::new_v4(),
            name,
            offset: offset.min(self.total_length),
            note: note.filter(|n| !n.trim().is_empty()),
            created_utc: Utc::now(),
        };
        let id = bookmark.id;
        let idx = self
            .bookmarks
            .partition_point(|existing| existing.offset <= bookmark.offset);
        self.bookmarks.insert(idx, bookmark);
        id
    }

    pub fn remove_bookmark(&mut self, id: Uuid) -> Option<Bookmark> {
        let idx = self.bookmarks.iter().position(|b| b.id == id)?;
        Some(self.bookmarks.remove(idx))
    }

    pub fn bookmark(&self, id: Uuid) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    /// Position of a bookmark as a percentage of the book.
    pub fn bookmark_progress(&self, bookmark: &Bookmark) -> f64 {
        if self.total_length == 0 {
            return 0.0;
        }
        (bookmark.offset as f64 / self.total_length as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// In-memory bookshelf.
#[derive(Debug, Clone, Default)]
pub struct Library {
    books: Vec<Book>,
}

/// Outcome of importing a file into the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Added(Uuid),
    AlreadyPresent(Uuid),
}

impl Library {
    pub fn new(books: Vec<Book>) -> Self {
        Library { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id == id)
    }

    pub fn first(&self) -> Option<&Book> {
        self.books.first()
    }

    /// Add a book for `path` unless one with the same path (ignoring case)
    /// is already shelved.
    pub fn import(&mut self, path: PathBuf) -> ImportOutcome {
        let wanted = path.to_string_lossy().to_lowercase();
        if let Some(existing) = self
            .books
            .iter()
            .find(|b| b.file_path.to_string_lossy().to_lowercase() == wanted)
        {
            return ImportOutcome::AlreadyPresent(existing.id);
        }
        let book = Book::new(path);
        let id = book.id;
        info!(title = %book.title, path = %book.file_path.display(), "Imported book");
        self.books.push(book);
        self.sort_by_recent();
        ImportOutcome::Added(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Book> {
        let idx = self.books.iter().position(|b| b.id == id)?;
        Some(self.books.remove(idx))
    }

    /// Most recently opened first, ties broken by case-insensitive title.
    pub fn sort_by_recent(&mut self) {
        self.books.sort_by(|a, b| {
            b.last_opened_utc
                .cmp(&a.last_opened_utc)
                .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        });
    }
}

/// Reads and writes `library.json`.
#[derive(Debug, Clone)]
pub struct LibraryStore {
    dir: PathBuf,
}

impl LibraryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LibraryStore { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(LIBRARY_FILE_NAME)
    }

    pub fn load(&self) -> Library {
        let path = self.path();
        if !path.exists() {
            if let Err(err) = fs::create_dir_all(&self.dir) {
                warn!(dir = %self.dir.display(), "Failed to create data directory: {err}");
            }
            debug!(path = %path.display(), "No library file yet");
            return Library::default();
        }
        match read_books(&path) {
            Ok(books) => {
                info!(path = %path.display(), books = books.len(), "Loaded library");
                Library::new(books)
            }
            Err(err) => {
                warn!(path = %path.display(), "Starting with an empty library: {err:#}");
                Library::default()
            }
        }
    }

    pub fn save(&self, books: &[Book]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.path();
        let json = serde_json::to_string_pretty(books).context("Failed to serialize library")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), books = books.len(), "Saved library");
        Ok(())
    }
}

fn read_books(path: &Path) -> Result<Vec<Book>> {
    let data =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Invalid library JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn title_comes_from_file_stem() {
        let book = Book::new(PathBuf::from("/books/三体.txt"));
        assert_eq!(book.title, "三体");
        let untitled = Book::new(PathBuf::from("/books/   .txt"));
        assert_eq!(untitled.title, UNTITLED_BOOK);
    }

    #[test]
    fn progress_is_clamped() {
        let mut book = Book::new(PathBuf::from("a.txt"));
        assert_eq!(book.progress(), 0.0);
        book.total_length = 100;
        book.current_offset = 250;
        assert_eq!(book.progress(), 1.0);
        book.set_position(250, 100);
        assert_eq!(book.current_offset, 100);
    }

    #[test]
    fn import_deduplicates_paths_ignoring_case() {
        let mut library = Library::default();
        let first = library.import(PathBuf::from("C:/Novels/Book.txt"));
        let second = library.import(PathBuf::from("c:/novels/book.TXT"));
        let ImportOutcome::Added(id) = first else {
            panic!("first import should add the book");
        };
        assert_eq!(second, ImportOutcome::AlreadyPresent(id));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn sorts_most_recent_first_then_title() {
        let now = Utc::now();
        let mut a = Book::new(PathBuf::from("b.txt"));
        a.last_opened_utc = now;
        let mut b = Book::new(PathBuf::from("A.txt"));
        b.last_opened_utc = now;
        let mut c = Book::new(PathBuf::from("c.txt"));
        c.last_opened_utc = now + Duration::seconds(5);
        let mut library = Library::new(vec![a, b, c]);
        library.sort_by_recent();
        let titles: Vec<&str> = library.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "A", "b"]);
    }

    #[test]
    fn bookmarks_stay_ordered_and_clamped() {
        let mut book = Book::new(PathBuf::from("a.txt"));
        book.total_length = 10_000;
        book.add_bookmark("late".into(), 8_000, Some("climax".into()));
        let early = book.add_bookmark("early".into(), 1_000, Some("  ".into()));
        book.add_bookmark("beyond".into(), 50_000, None);
        let offsets: Vec<usize> = book.bookmarks.iter().map(|b| b.offset).collect();
        assert_eq!(offsets, vec![1_000, 8_000, 10_000]);
        assert_eq!(book.bookmark(early).and_then(|b| b.note.clone()), None);
        let late = &book.bookmarks[1];
        assert!((book.bookmark_progress(late) - 80.0).abs() < f64::EPSILON);
        assert!(book.remove_bookmark(early).is_some());
        assert!(book.remove_bookmark(early).is_none());
        assert_eq!(book.bookmarks.len(), 2);
    }

    #[test]
    fn store_round_trips_books() {
        let dir = tempfile::tempdir().unwrap();
        let store = LibraryStore::new(dir.path().join("YuYue"));
        assert!(store.load().is_empty());

        let mut book = Book::new(PathBuf::from("/tmp/novel.txt"));
        book.set_position(42, 1000);
        book.chapters.push(Chapter {
            title: "第一章".into(),
            start_offset: 0,
            length: 1000,
        });
        book.add_bookmark("mark".into(), 500, None);
        book.reading_minutes = 12;
        store.save(std::slice::from_ref(&book)).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.books(), &[book]);
    }

    #[test]
    fn corrupt_library_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LIBRARY_FILE_NAME), "{ not json").unwrap();
        let store = LibraryStore::new(dir.path());
        assert!(store.load().is_empty());
    }
}
