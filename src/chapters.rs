//! Chapter heading detection for plain-text novels.
//!
//! Headings are found by running a fixed set of line-anchored patterns over
//! the whole text. Every match start becomes a chapter boundary; a chapter
//! runs until the next boundary or the end of the book.

use crate::document::Document;
use crate::library::Chapter;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

/// Title used when no heading pattern matches anything.
pub const WHOLE_TEXT_TITLE: &str = "Full Text";

/// Longest distance (in characters) to look for the end of a heading line.
const MAX_TITLE_LINE: usize = 100;
/// Title length used when the heading line has no nearby line break.
const FALLBACK_TITLE_LEN: usize = 50;

static CHAPTER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?m)^第[0-9零一二三四五六七八九十百千万]+[章节回集卷部篇][\s:：]*.{0,30}$",
        r"(?mi)^Chapter\s+\d+[\s:：]*.{0,30}$",
        r"(?m)^\d+[.、]\s*.{1,30}$",
        r"(?m)^[【\[]第[0-9零一二三四五六七八九十百千万]+[章节回集卷部篇][】\]]\s*.{0,30}$",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Split `doc` into chapters. Always returns at least one chapter.
pub fn extract_chapters(doc: &Document) -> Vec<Chapter> {
    let text = doc.text();
    let mut boundaries = BTreeSet::new();

    for pattern in CHAPTER_PATTERNS.iter() {
        for found in pattern.find_iter(text) {
            if found.as_str().trim().chars().count() >= 2 {
                boundaries.insert(doc.char_offset_of_byte(found.start()));
            }
        }
    }

    let positions: Vec<usize> = boundaries.into_iter().collect();
    let mut chapters = Vec::with_capacity(positions.len().max(1));

    for (idx, &start) in positions.iter().enumerate() {
        let end = positions.get(idx + 1).copied().unwrap_or(doc.len());
        chapters.push(Chapter {
            title: heading_title(doc, start),
            start_offset: start,
            length: end - start,
        });
    }

    if chapters.is_empty() {
        chapters.push(Chapter {
            title: WHOLE_TEXT_TITLE.to_string(),
            start_offset: 0,
            length: doc.len(),
        });
    }

    debug!(chapters = chapters.len(), "Extracted chapters");
    chapters
}

fn heading_title(doc: &Document, start: usize) -> String {
    let end = match doc.find_char_from(start, '\n') {
        Some(newline) if newline <= start + MAX_TITLE_LINE => newline,
        _ => (start + FALLBACK_TITLE_LEN).min(doc.len()),
    };
    doc.slice(start, end - start).trim().to_string()
}

/// Index of the chapter containing `offset`: the last chapter starting at or
/// before it. `None` for text ahead of the first heading.
pub fn chapter_index_at(chapters: &[Chapter], offset: usize) -> Option<usize> {
    let idx = chapters.partition_point(|chapter| chapter.start_offset <= offset);
    idx.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<Chapter> {
        extract_chapters(&Document::new(text.to_string()))
    }

    #[test]
    fn text_without_headings_is_one_chapter() {
        let text = "只是一些普通的文字。\n没有任何章节标题。\n";
        let chapters = extract(text);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, WHOLE_TEXT_TITLE);
        assert_eq!(chapters[0].start_offset, 0);
        assert_eq!(chapters[0].length, text.chars().count());
    }

    #[test]
    fn empty_text_is_one_empty_chapter() {
        let chapters = extract("");
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].length, 0);
    }

    #[test]
    fn detects_chinese_headings_with_contiguous_ranges() {
        let text = "\n第一章 开始的故事\n\n这是第一章的内容...\n\n第二章 冒险继续\n\n这是第二章的内容...\n";
        let chapters = extract(text);
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "第一章 开始的故事");
        assert_eq!(chapters[0].start_offset, 1);
        assert_eq!(chapters[1].title, "第二章 冒险继续");
        assert_eq!(
            chapters[0].start_offset + chapters[0].length,
            chapters[1].start_offset
        );
        assert_eq!(
            chapters[1].start_offset + chapters[1].length,
            text.chars().count()
        );
    }

    #[test]
    fn detects_english_numbered_and_bracketed_headings() {
        let text = "chapter 1: The Start\nbody\n2. Second part\nbody\n【第三回】 Third\nbody";
        let titles: Vec<String> = extract(text).into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["chapter 1: The Start", "2. Second part", "【第三回】 Third"]);
    }

    #[test]
    fn long_lines_are_not_headings() {
        let line = format!("第一章{}\n", "很长".repeat(40));
        let chapters = extract(&line);
        assert_eq!(chapters[0].title, WHOLE_TEXT_TITLE);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let text = "第一章 甲\r\n内容\r\n第二章 乙\r\n内容";
        let chapters = extract(text);
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[1].title, "第二章 乙");
    }

    #[test]
    fn finds_chapter_containing_offset() {
        let chapters = vec![
            Chapter { title: "a".into(), start_offset: 5, length: 10 },
            Chapter { title: "b".into(), start_offset: 15, length: 10 },
        ];
        assert_eq!(chapter_index_at(&chapters, 0), None);
        assert_eq!(chapter_index_at(&chapters, 4), None);
        assert_eq!(chapter_index_at(&chapters, 5), Some(0));
        assert_eq!(chapter_index_at(&chapters, 14), Some(0));
        assert_eq!(chapter_index_at(&chapters, 15), Some(1));
        assert_eq!(chapter_index_at(&chapters, 99), Some(1));
        assert_eq!(chapter_index_at(&[], 3), None);
    }
}
