/// Limits and defaults for reader controls.
pub(crate) const SHEET_SAMPLE_ROWS: usize = 15;
pub(crate) const PANEL_WIDTH_PX: f32 = 240.0;
pub(crate) const READER_PADDING_PX: u16 = 24;
pub(crate) const COLUMN_SPACING_PX: f32 = 32.0;
pub(crate) const STATUS_FONT_SIZE_PX: f32 = 13.0;
pub(crate) const DEFAULT_BOOKMARK_NAME: &str = "Bookmark";
pub(crate) const EXPORT_FILE_NAME: &str = "yuyue-preferences.json";
