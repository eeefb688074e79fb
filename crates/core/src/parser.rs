//! Line-per-slide text parsing.
//!
//! Every non-blank line of the input becomes one caption. Labels are taken
//! from the line's position in the original file, so blank lines leave gaps
//! in the numbering:
//!
//! ```text
//! Revenue: $5M        -> "Slide 1"
//!                     (skipped)
//! Growth: 12%         -> "Slide 3"
//! ```

use crate::error::Result;
use crate::types::{CaptionEntry, CaptionSet};
use std::path::Path;

/// Parser turning line-delimited text into a [`CaptionSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParser;

/// Whitespace plus the ASCII separators U+001C..=U+001F, which plain-text
/// tools also treat as blank.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

impl TextParser {
    /// Create a new text parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse captions from in-memory text.
    pub fn parse_str(&self, text: &str) -> CaptionSet {
        // Normalize line endings to \n first
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        let mut captions = CaptionSet::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim_matches(is_blank);
            if !line.is_empty() {
                captions.push(CaptionEntry::for_line(idx + 1, line));
            }
        }
        captions
    }

    /// Parse captions from a UTF-8 text file.
    ///
    /// An empty file yields an empty set. Non-UTF-8 content is reported as
    /// an I/O error.
    pub fn parse_file(&self, path: &Path) -> Result<CaptionSet> {
        let text = std::fs::read_to_string(path)?;
        let captions = self.parse_str(&text);
        log::debug!(
            "Parsed {} captions from {}",
            captions.len(),
            path.display()
        );
        Ok(captions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn labels(set: &CaptionSet) -> Vec<&str> {
        set.iter().map(|e| e.slide_id.as_str()).collect()
    }

    #[test]
    fn test_blank_lines_keep_original_numbering() {
        let set = TextParser::new().parse_str("Revenue: $5M\n\nGrowth: 12%\n");
        assert_eq!(labels(&set), vec!["Slide 1", "Slide 3"]);
        assert_eq!(set.get("Slide 1"), Some("Revenue: $5M"));
        assert_eq!(set.get("Slide 3"), Some("Growth: 12%"));
    }

    #[test]
    fn test_strips_surrounding_whitespace() {
        let set = TextParser::new().parse_str("  1 + 5  \n\t2 * 3\t");
        let texts: Vec<&str> = set.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["1 + 5", "2 * 3"]);
    }

    #[test]
    fn test_whitespace_only_lines_are_blank() {
        let set = TextParser::new().parse_str("   \nfirst\n \t \nsecond");
        assert_eq!(labels(&set), vec!["Slide 2", "Slide 4"]);
    }

    #[test]
    fn test_empty_input_gives_empty_set() {
        assert!(TextParser::new().parse_str("").is_empty());
        assert!(TextParser::new().parse_str("\n\n\n").is_empty());
    }

    #[test]
    fn test_crlf_and_bare_cr_line_endings() {
        let set = TextParser::new().parse_str("one\r\n\r\nthree\rfour");
        assert_eq!(labels(&set), vec!["Slide 1", "Slide 3", "Slide 4"]);
        assert_eq!(set.get("Slide 4"), Some("four"));
    }

    #[test]
    fn test_entry_count_matches_non_blank_lines() {
        let input = "a\n\nb\n\n\nc\nd\n   \ne";
        let set = TextParser::new().parse_str(input);
        let non_blank = input.lines().filter(|l| !l.trim().is_empty()).count();
        assert_eq!(set.len(), non_blank);
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figures.txt");
        std::fs::write(&path, "Revenue: $5M\n\nGrowth: 12%\n").unwrap();

        let set = TextParser::new().parse_file(&path).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_parse_file_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = TextParser::new().parse_file(&path).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_separator_only_line_is_blank() {
        let set = TextParser::new().parse_str("a\n\u{1c}\u{1d}\nb\n\u{1f} c \u{1e}\n");
        let labels: Vec<&str> = set.iter().map(|e| e.slide_id.as_str()).collect();
        assert_eq!(labels, vec!["Slide 1", "Slide 3", "Slide 4"]);
        assert_eq!(set.get("Slide 4"), Some("c"));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = TextParser::new()
            .parse_file(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
