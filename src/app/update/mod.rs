use std::path::PathBuf;
use uuid::Uuid;

mod appearance;
mod bookshelf;
mod core;
mod navigation;
mod session;
mod settings;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    SaveLibrary,
    SavePreferences,
    SaveStatistics,
    LoadBook { book_id: Uuid, path: PathBuf },
    ExportPreferences(PathBuf),
    ImportPreferences(PathBuf),
    MinimizeWindow,
    SetFullscreen(bool),
    SetTopmost(bool),
    Quit,
}
