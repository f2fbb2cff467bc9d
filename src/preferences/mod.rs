//! User preferences and reading statistics.
//!
//! Both live as JSON next to the library in the data directory. Loading never
//! fails; missing fields take their defaults and out-of-range values are
//! clamped so a hand-edited file cannot put the reader in a broken state.

mod defaults;
mod models;
mod store;

pub use models::{MAX_AUTO_PAGE_SECS, MAX_COLUMNS, MIN_AUTO_PAGE_SECS, MIN_COLUMNS, ReadingPreferences};
pub use store::PreferencesStore;
