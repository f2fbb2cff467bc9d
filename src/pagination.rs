//! Pagination utilities.
//!
//! A page is a fixed-size window of characters starting at a reading offset.
//! Nothing here knows about layout: the reader view renders whatever window
//! these functions produce and lets the text wrap.

/// Default page size in characters.
pub const DEFAULT_PAGE_SIZE: usize = 1200;
/// Smallest page size offered in the UI.
pub const MIN_PAGE_SIZE: usize = 600;
/// Largest page size offered in the UI.
pub const MAX_PAGE_SIZE: usize = 5000;
/// Increment used by the page size buttons.
pub const PAGE_SIZE_STEP: usize = 400;

/// Default font size (points).
pub const DEFAULT_FONT_SIZE: u32 = 16;
/// Minimum allowed font size (points).
pub const MIN_FONT_SIZE: u32 = 12;
/// Maximum allowed font size (points).
pub const MAX_FONT_SIZE: u32 = 36;

/// Last valid reading offset for a text of `len` characters.
pub fn last_offset(len: usize) -> usize {
    len.saturating_sub(1)
}

pub fn clamp_page_size(page_size: usize) -> usize {
    page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}

pub fn clamp_font_size(font_size: u32) -> u32 {
    font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

pub fn can_go_next(offset: usize, page_size: usize, len: usize) -> bool {
    offset.saturating_add(page_size) < len
}

pub fn can_go_previous(offset: usize) -> bool {
    offset > 0
}

/// Offset of the following page; stays put on the last page.
pub fn next_offset(offset: usize, page_size: usize, len: usize) -> usize {
    if !can_go_next(offset, page_size, len) {
        return offset.min(last_offset(len));
    }
    (offset + page_size).min(last_offset(len))
}

pub fn previous_offset(offset: usize, page_size: usize) -> usize {
    offset.saturating_sub(page_size)
}

pub fn jump_to_end(page_size: usize, len: usize) -> usize {
    len.saturating_sub(page_size)
}

/// Offset to resume at when a book is opened.
pub fn restore_offset(saved: usize, len: usize) -> usize {
    saved.min(last_offset(len))
}

/// Start and length of the window to render for `offset`.
///
/// An offset at or past the end snaps back so the final page is shown.
pub fn page_window(offset: usize, page_size: usize, len: usize) -> (usize, usize) {
    let length = page_size.min(len.saturating_sub(offset));
    if length == 0 {
        let start = len.saturating_sub(page_size.min(len));
        return (start, len - start);
    }
    (offset, length)
}

/// Zero-based page index, as shown next to the total.
pub fn current_page_number(offset: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    offset / page_size
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Label like `"3 / 120"`; `"0 / 0"` for an empty book.
pub fn progress_display(offset: usize, page_size: usize, len: usize) -> String {
    if len == 0 {
        return "0 / 0".to_string();
    }
    format!(
        "{} / {}",
        current_page_number(offset, page_size),
        total_pages(len, page_size)
    )
}

/// Percentage read, rounded to one decimal and clamped to `[0, 100]`.
pub fn progress_percentage(offset: usize, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    let percent = offset as f64 / len as f64 * 100.0;
    ((percent * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

/// Line height that keeps CJK text legible at `font_size`.
pub fn line_height_for(font_size: u32) -> f32 {
    let size = font_size as f32;
    let proportional = (size * 1.6 * 10.0).round() / 10.0;
    proportional.max(size + 6.0).max(size + 4.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_page_advances_until_last_page() {
        assert_eq!(next_offset(0, 1200, 5000), 1200);
        assert_eq!(next_offset(3600, 1200, 5000), 4800);
        // Already on the last page.
        assert_eq!(next_offset(4800, 1200, 5000), 4800);
        assert!(!can_go_next(4800, 1200, 5000));
    }

    #[test]
    fn previous_page_stops_at_start() {
        assert_eq!(previous_offset(1500, 1200), 300);
        assert_eq!(previous_offset(300, 1200), 0);
        assert!(!can_go_previous(0));
    }

    #[test]
    fn jumps_and_restores_are_bounded() {
        assert_eq!(jump_to_end(1200, 5000), 3800);
        assert_eq!(jump_to_end(1200, 500), 0);
        assert_eq!(restore_offset(9000, 5000), 4999);
        assert_eq!(restore_offset(10, 0), 0);
    }

    #[test]
    fn offsets_never_leave_text_bounds() {
        for len in [0usize, 1, 599, 600, 1201, 7777] {
            for page_size in [MIN_PAGE_SIZE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE] {
                let mut offset = 0;
                for _ in 0..20 {
                    offset = next_offset(offset, page_size, len);
                    assert!(offset <= last_offset(len));
                }
                for _ in 0..20 {
                    offset = previous_offset(offset, page_size);
                    assert!(offset <= last_offset(len));
                }
                assert_eq!(offset, 0);
            }
        }
    }

    #[test]
    fn window_snaps_back_at_end() {
        assert_eq!(page_window(0, 1200, 5000), (0, 1200));
        assert_eq!(page_window(4800, 1200, 5000), (4800, 200));
        assert_eq!(page_window(5000, 1200, 5000), (3800, 1200));
        assert_eq!(page_window(700, 1200, 500), (0, 500));
        assert_eq!(page_window(0, 1200, 0), (0, 0));
    }

    #[test]
    fn progress_labels() {
        assert_eq!(progress_display(0, 1200, 0), "0 / 0");
        assert_eq!(progress_display(2400, 1200, 5000), "2 / 5");
        assert_eq!(total_pages(4800, 1200), 4);
        assert_eq!(progress_percentage(1, 3), 33.3);
        assert_eq!(progress_percentage(3, 3), 100.0);
        assert_eq!(progress_percentage(5, 0), 0.0);
    }

    #[test]
    fn line_height_tracks_font_size() {
        assert_eq!(line_height_for(16), 25.6);
        assert_eq!(line_height_for(12), 19.2);
        assert_eq!(line_height_for(5), 11.0);
    }

    #[test]
    fn sizes_are_clamped() {
        assert_eq!(clamp_page_size(100), MIN_PAGE_SIZE);
        assert_eq!(clamp_page_size(9000), MAX_PAGE_SIZE);
        assert_eq!(clamp_font_size(40), MAX_FONT_SIZE);
    }
}
