//! Domain types for captions and render settings.

use crate::error::Result;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// One slide's worth of source text and its ordinal label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionEntry {
    /// Label derived from the 1-based source line, e.g. `"Slide 3"`.
    pub slide_id: String,

    /// The stripped line text.
    pub text: String,
}

impl CaptionEntry {
    /// Create an entry for the given 1-based source line number.
    pub fn for_line(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            slide_id: slide_label(line_number),
            text: text.into(),
        }
    }
}

/// Ordinal label for a 1-based source line.
pub fn slide_label(line_number: usize) -> String {
    format!("Slide {}", line_number)
}

/// Ordered captions, one per non-blank input line.
///
/// Serializes as a JSON object whose key order matches line order:
///
/// ```json
/// {"Slide 1": "Revenue: $5M", "Slide 3": "Growth: 12%"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionSet {
    entries: Vec<CaptionEntry>,
}

impl CaptionSet {
    /// Create an empty caption set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Labels come from increasing line numbers, so
    /// callers never push a duplicate.
    pub fn push(&mut self, entry: CaptionEntry) {
        debug_assert!(self.get(&entry.slide_id).is_none());
        self.entries.push(entry);
    }

    /// Entries in line order.
    pub fn entries(&self) -> &[CaptionEntry] {
        &self.entries
    }

    /// Look up the caption text for a label.
    pub fn get(&self, slide_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.slide_id == slide_id)
            .map(|e| e.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaptionEntry> {
        self.entries.iter()
    }

    /// Write the set as a JSON object, replacing any existing file.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        log::debug!("Wrote {} captions to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a set previously written by [`CaptionSet::write_json`].
    pub fn read_json(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl<'a> IntoIterator for &'a CaptionSet {
    type Item = &'a CaptionEntry;
    type IntoIter = std::slice::Iter<'a, CaptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for CaptionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.slide_id, &entry.text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CaptionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CaptionSetVisitor;

        impl<'de> Visitor<'de> for CaptionSetVisitor {
            type Value = CaptionSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object mapping slide labels to caption text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                // Visiting in document order keeps the original line order.
                while let Some((slide_id, text)) = access.next_entry::<String, String>()? {
                    entries.push(CaptionEntry { slide_id, text });
                }
                Ok(CaptionSet { entries })
            }
        }

        deserializer.deserialize_map(CaptionSetVisitor)
    }
}

/// Caption text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    White,
    #[default]
    Black,
}

impl TextColor {
    /// Resolve a free-form color choice.
    ///
    /// Only a case-insensitive `"white"` selects white; every other value,
    /// including an empty string, falls back to black.
    pub fn resolve(choice: &str) -> Self {
        if choice.eq_ignore_ascii_case("white") {
            Self::White
        } else {
            Self::Black
        }
    }

    /// Six-digit RGB hex as used by DrawingML `srgbClr`.
    pub fn rgb_hex(self) -> &'static str {
        match self {
            Self::White => "FFFFFF",
            Self::Black => "000000",
        }
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => f.write_str("white"),
            Self::Black => f.write_str("black"),
        }
    }
}

/// Settings applied uniformly to every content slide of one conversion.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image stretched over each content slide.
    pub background_image: PathBuf,

    /// Caption color.
    pub text_color: TextColor,
}

impl RenderConfig {
    pub fn new(background_image: impl Into<PathBuf>, text_color: TextColor) -> Self {
        Self {
            background_image: background_image.into(),
            text_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CaptionSet {
        let mut set = CaptionSet::new();
        set.push(CaptionEntry::for_line(1, "Revenue: $5M"));
        set.push(CaptionEntry::for_line(3, "Growth: 12%"));
        set
    }

    #[test]
    fn test_resolve_white_any_case() {
        assert_eq!(TextColor::resolve("white"), TextColor::White);
        assert_eq!(TextColor::resolve("WHITE"), TextColor::White);
        assert_eq!(TextColor::resolve("White"), TextColor::White);
    }

    #[test]
    fn test_resolve_falls_back_to_black() {
        assert_eq!(TextColor::resolve("black"), TextColor::Black);
        assert_eq!(TextColor::resolve(""), TextColor::Black);
        assert_eq!(TextColor::resolve("red"), TextColor::Black);
        assert_eq!(TextColor::resolve(" white"), TextColor::Black);
    }

    #[test]
    fn test_json_keys_follow_line_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"Slide 1":"Revenue: $5M","Slide 3":"Growth: 12%"}"#);
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let set: CaptionSet =
            serde_json::from_str(r#"{"Slide 9":"last?","Slide 2":"no, first"}"#).unwrap();
        let ids: Vec<&str> = set.iter().map(|e| e.slide_id.as_str()).collect();
        assert_eq!(ids, vec!["Slide 9", "Slide 2"]);
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        assert!(serde_json::from_str::<CaptionSet>(r#"["Slide 1"]"#).is_err());
    }

    #[test]
    fn test_write_and_read_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        sample().write_json(&path).unwrap();

        let read = CaptionSet::read_json(&path).unwrap();
        assert_eq!(read, sample());
        assert_eq!(read.get("Slide 3"), Some("Growth: 12%"));
        assert_eq!(read.get("Slide 2"), None);
    }
}
