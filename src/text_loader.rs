//! Plain-text loading with encoding detection.
//!
//! Novels downloaded from the web arrive in whatever encoding the uploader
//! used, most often UTF-8, UTF-16 or one of the Chinese legacy code pages.
//! Detection order: byte-order mark, then UTF-8, UTF-16LE, GB18030 and Big5,
//! taking the first decode with an acceptable share of garbled characters.

use anyhow::{Context, Result, bail};
use encoding_rs::{BIG5, Encoding, GB18030, UTF_8, UTF_16LE};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Highest share of garbled characters a candidate decode may contain.
const MAX_GARBLED_RATIO: f64 = 0.05;
/// Below this share of GB2312 pairs, legacy text is tried as Big5 first.
const MIN_GB2312_SHARE: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedText {
    pub content: String,
    /// Label of the encoding that produced `content`, e.g. `UTF-8` or `gb18030`.
    pub encoding: &'static str,
}

pub fn load_text(path: &Path) -> Result<LoadedText> {
    if !path.is_file() {
        bail!("File not found: {}", path.display());
    }
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let loaded = decode_bytes(&bytes);
    info!(
        path = %path.display(),
        encoding = loaded.encoding,
        bytes = bytes.len(),
        "Loaded text file"
    );
    Ok(loaded)
}

pub fn decode_bytes(bytes: &[u8]) -> LoadedText {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (content, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        debug!(encoding = encoding.name(), "Decoded using byte-order mark");
        return LoadedText {
            content: content.into_owned(),
            encoding: encoding.name(),
        };
    }

    for encoding in [UTF_8, UTF_16LE, GB18030, BIG5] {
        if encoding == UTF_16LE && !looks_like_utf16le(bytes) {
            continue;
        }
        // Big5 bytes are also valid GB18030, so check which table fits better.
        if encoding == GB18030 {
            let share = gb2312_share(bytes);
            if share < MIN_GB2312_SHARE {
                debug!(share, "Double-byte text mostly outside GB2312; trying Big5 first");
                if let Some(loaded) = clean_decode(BIG5, bytes) {
                    return loaded;
                }
            }
        }
        if let Some(loaded) = clean_decode(encoding, bytes) {
            return loaded;
        }
    }

    warn!("No encoding decoded cleanly; using lossy UTF-8");
    LoadedText {
        content: String::from_utf8_lossy(bytes).into_owned(),
        encoding: UTF_8.name(),
    }
}

fn clean_decode(encoding: &'static Encoding, bytes: &[u8]) -> Option<LoadedText> {
    let (content, _) = encoding.decode_without_bom_handling(bytes);
    let ratio = garbled_ratio(&content);
    if ratio > MAX_GARBLED_RATIO {
        debug!(encoding = encoding.name(), ratio, "Rejected candidate encoding");
        return None;
    }
    Some(LoadedText {
        content: content.into_owned(),
        encoding: encoding.name(),
    })
}

/// Share of double-byte pairs inside the GB2312 area (both bytes in
/// `A1..=FE`, lead at most `F7`). Simplified Chinese text sits almost entirely
/// there; Big5 puts many trail bytes in `40..=7E`.
fn gb2312_share(bytes: &[u8]) -> f64 {
    let (mut pairs, mut inside) = (0usize, 0usize);
    let mut idx = 0;
    while idx < bytes.len() {
        let lead = bytes[idx];
        if lead < 0x80 {
            idx += 1;
            continue;
        }
        let Some(&trail) = bytes.get(idx + 1) else {
            break;
        };
        if (0x30..=0x39).contains(&trail) {
            // GB18030 four-byte sequence.
            idx += 4;
            continue;
        }
        pairs += 1;
        if (0xA1..=0xF7).contains(&lead) && (0xA1..=0xFE).contains(&trail) {
            inside += 1;
        }
        idx += 2;
    }
    if pairs == 0 {
        return 1.0;
    }
    inside as f64 / pairs as f64
}

/// Replacement and NUL characters over all characters.
fn garbled_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut garbled = 0usize;
    for ch in text.chars() {
        total += 1;
        if ch == char::REPLACEMENT_CHARACTER || ch == '\0' {
            garbled += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    garbled as f64 / total as f64
}

/// BOM-less UTF-16LE is only considered when a line feed code unit appears
/// on an even boundary. Legacy CJK bytes decode as UTF-16 without errors, so
/// the ratio alone cannot reject them.
fn looks_like_utf16le(bytes: &[u8]) -> bool {
    bytes.len() % 2 == 0 && bytes.chunks_exact(2).any(|unit| unit == [0x0A, 0x00])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le(text: &str, bom: bool) -> Vec<u8> {
        let mut bytes = if bom { vec![0xFF, 0xFE] } else { Vec::new() };
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn plain_utf8_is_detected() {
        let loaded = decode_bytes("第一章 开始\nhello".as_bytes());
        assert_eq!(loaded.encoding, "UTF-8");
        assert_eq!(loaded.content, "第一章 开始\nhello");
    }

    #[test]
    fn bom_wins_and_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("abc".as_bytes());
        let loaded = decode_bytes(&bytes);
        assert_eq!(loaded.content, "abc");

        let loaded = decode_bytes(&utf16le("阅读", true));
        assert_eq!(loaded.encoding, "UTF-16LE");
        assert_eq!(loaded.content, "阅读");
    }

    #[test]
    fn bomless_utf16le_with_line_breaks_is_detected() {
        let loaded = decode_bytes(&utf16le("Chapter 1\nThe start\n", false));
        assert_eq!(loaded.encoding, "UTF-16LE");
        assert_eq!(loaded.content, "Chapter 1\nThe start\n");
    }

    #[test]
    fn gb18030_text_is_detected() {
        let original = "第一章 开始的故事\n这是第一章的内容。\n";
        let (bytes, _, _) = GB18030.encode(original);
        let loaded = decode_bytes(&bytes);
        assert_eq!(loaded.encoding, "gb18030");
        assert_eq!(loaded.content, original);
    }

    #[test]
    fn big5_text_is_not_mistaken_for_gb18030() {
        let original = "第一章 開始\n一二三，是的。這是一個故事，一個很長的故事。\n";
        let (bytes, _, unmappable) = BIG5.encode(original);
        assert!(!unmappable);
        let (as_gb, _) = GB18030.decode_without_bom_handling(&bytes);
        assert!(garbled_ratio(&as_gb) <= MAX_GARBLED_RATIO);

        let loaded = decode_bytes(&bytes);
        assert_eq!(loaded.encoding, "Big5");
        assert_eq!(loaded.content, original);
    }

    #[test]
    fn undecodable_bytes_fall_back_to_lossy_utf8() {
        let loaded = decode_bytes(&[0xFF; 64]);
        assert_eq!(loaded.encoding, "UTF-8");
        assert!(loaded.content.chars().all(|c| c == char::REPLACEMENT_CHARACTER));
    }

    #[test]
    fn empty_input_is_empty_utf8() {
        let loaded = decode_bytes(&[]);
        assert_eq!(loaded.encoding, "UTF-8");
        assert!(loaded.content.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_text(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("novel.txt");
        fs::write(&path, "正文").unwrap();
        let loaded = load_text(&path).unwrap();
        assert_eq!(loaded.content, "正文");
    }
}
