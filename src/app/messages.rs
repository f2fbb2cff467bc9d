use super::state::OpenedBook;
use crate::camouflage::CamouflageTemplate;
use crate::preferences::ReadingPreferences;
use iced::keyboard::{Key, Modifiers};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub enum Message {
    // Bookshelf
    ImportPathChanged(String),
    ImportRequested,
    SelectBook(Uuid),
    OpenBook(Uuid),
    OpenSelectedBook,
    DeleteSelectedBook,
    BookLoaded {
        book_id: Uuid,
        opened: Arc<OpenedBook>,
    },
    BookLoadFailed {
        book_id: Uuid,
        error: String,
    },

    // Reading
    NextPage,
    PreviousPage,
    JumpToBeginning,
    JumpToEnd,
    NextChapter,
    PreviousChapter,
    GoToChapter(usize),
    GoToBookmark(Uuid),
    BookmarkNameChanged(String),
    BookmarkNoteChanged(String),
    AddBookmark,
    RemoveBookmark(Uuid),
    SaveProgress,
    BackToBookshelf,
    ToggleTimer,

    // Appearance
    IncreaseFontSize,
    DecreaseFontSize,
    IncreasePageSize,
    DecreasePageSize,
    ResetReaderPreferences,
    ToggleTheme,
    SelectTheme(String),
    ToggleImmersive,
    ToggleChapterPanel,
    ToggleBookmarkPanel,
    ToggleStatisticsPanel,
    ToggleAutoPage,
    AutoPageIntervalChanged(u64),
    ColumnCountChanged(u8),
    ToggleTopmost,

    // Settings
    ShowSettings,
    CloseSettings,
    ToggleAutoResume,
    ToggleAutoSaveProgress,
    ToggleReadingTimerEnabled,
    CustomBackgroundChanged(String),
    CustomForegroundChanged(String),
    ApplyCustomTheme,
    HotkeyInputChanged(usize, String),
    ApplyHotkey(usize),
    ToggleHotkeyEnabled(usize),
    RestoreDefaultHotkeys,
    PreferencesPathChanged(String),
    ExportPreferences,
    ImportPreferences,
    PreferencesExported(Result<PathBuf, String>),
    PreferencesImported(Result<ReadingPreferences, String>),
    ResetAllPreferences,

    // Camouflage
    ToggleCamouflage,
    NextCamouflage,
    SelectCamouflage(CamouflageTemplate),

    // Runtime
    KeyPressed { key: Key, modifiers: Modifiers },
    ClockTick(Instant),
    AutoPageTick(Instant),
    AutoSaveTick(Instant),
    MinimizeWindow,
    CloseRequested,
}
