//! Decoded book text addressed by character offset.
//!
//! Offsets stored in the library and used by pagination count Unicode scalar
//! values, not bytes, so a page of 1200 covers the same amount of CJK or
//! Latin text. `Document` keeps a sparse byte-position index so slicing by
//! character offset does not rescan the whole string on every page turn.

/// Characters between two byte-position checkpoints.
const CHECKPOINT_STRIDE: usize = 1024;

#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    char_len: usize,
    /// Byte position of every `CHECKPOINT_STRIDE`-th character.
    checkpoints: Vec<usize>,
}

impl Document {
    pub fn new(text: String) -> Self {
        let mut checkpoints = Vec::with_capacity(text.len() / CHECKPOINT_STRIDE + 1);
        let mut char_len = 0usize;
        for (byte_idx, _) in text.char_indices() {
            if char_len % CHECKPOINT_STRIDE == 0 {
                checkpoints.push(byte_idx);
            }
            char_len += 1;
        }
        Document {
            text,
            char_len,
            checkpoints,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// Byte position of the character at `char_offset`, or the text length
    /// when the offset is at or past the end.
    pub fn byte_at(&self, char_offset: usize) -> usize {
        if char_offset >= self.char_len {
            return self.text.len();
        }
        let checkpoint = char_offset / CHECKPOINT_STRIDE;
        let base = self.checkpoints[checkpoint];
        let skip = char_offset - checkpoint * CHECKPOINT_STRIDE;
        self.text[base..]
            .char_indices()
            .nth(skip)
            .map(|(idx, _)| base + idx)
            .unwrap_or(self.text.len())
    }

    /// Character offset of a byte position produced by a match over `text()`.
    pub fn char_offset_of_byte(&self, byte_pos: usize) -> usize {
        let byte_pos = byte_pos.min(self.text.len());
        let checkpoint = match self.checkpoints.binary_search(&byte_pos) {
            Ok(idx) => return idx * CHECKPOINT_STRIDE,
            Err(0) => return 0,
            Err(idx) => idx - 1,
        };
        let base = self.checkpoints[checkpoint];
        checkpoint * CHECKPOINT_STRIDE + self.text[base..byte_pos].chars().count()
    }

    /// Up to `len` characters starting at `start`, clamped to the text.
    pub fn slice(&self, start: usize, len: usize) -> &str {
        let begin = self.byte_at(start);
        let end = self.byte_at(start.saturating_add(len));
        &self.text[begin..end]
    }

    /// Character offset of the first `ch` at or after `from`.
    pub fn find_char_from(&self, from: usize, ch: char) -> Option<usize> {
        let begin = self.byte_at(from);
        self.text[begin..]
            .chars()
            .position(|c| c == ch)
            .map(|pos| from + pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_characters_not_bytes() {
        let doc = Document::new("第一章 开始".to_string());
        assert_eq!(doc.len(), 6);
        assert_eq!(doc.slice(0, 3), "第一章");
        assert_eq!(doc.slice(4, 10), "开始");
    }

    #[test]
    fn slicing_past_checkpoints_matches_naive_chars() {
        let text: String = "abc测试".repeat(700);
        let doc = Document::new(text.clone());
        let naive: String = text.chars().skip(2500).take(37).collect();
        assert_eq!(doc.slice(2500, 37), naive);
        assert_eq!(doc.len(), 3500);
    }

    #[test]
    fn byte_and_char_offsets_round_trip() {
        let doc = Document::new("α".repeat(3000));
        for offset in [0, 1, 1023, 1024, 1025, 2999] {
            let byte = doc.byte_at(offset);
            assert_eq!(doc.char_offset_of_byte(byte), offset);
        }
        assert_eq!(doc.byte_at(5000), doc.text().len());
    }

    #[test]
    fn finds_newline_after_offset() {
        let doc = Document::new("line one\nline two\n".to_string());
        assert_eq!(doc.find_char_from(0, '\n'), Some(8));
        assert_eq!(doc.find_char_from(9, '\n'), Some(17));
        assert_eq!(doc.find_char_from(18, '\n'), None);
    }

    #[test]
    fn empty_document_is_safe() {
        let doc = Document::new(String::new());
        assert!(doc.is_empty());
        assert_eq!(doc.slice(0, 100), "");
        assert_eq!(doc.char_offset_of_byte(0), 0);
    }
}
