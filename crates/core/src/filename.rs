//! Upload filename rules.
//!
//! Uploaded files are accepted by extension only and stored under a
//! sanitized name, so a client-supplied name can never escape the upload
//! directory.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Extensions accepted for both the caption text and the background image.
pub const ALLOWED_EXTENSIONS: &[&str] = &["txt", "png", "jpg", "jpeg"];

/// Characters that survive sanitizing.
static UNSAFE_CHARS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.-]").unwrap());

/// Device names that cannot be used as file names on Windows.
const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM0", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
    "COM8", "COM9", "LPT0", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8",
    "LPT9",
];

/// Check whether a filename carries one of the [`ALLOWED_EXTENSIONS`].
///
/// The extension is whatever follows the last `.`, compared case-insensitively.
/// Names without a `.` are rejected.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Reduce a client-supplied filename to a safe, flat ASCII name.
///
/// - Unicode is decomposed (NFKD) and non-ASCII characters dropped,
///   so `"ümläut"` becomes `"umlaut"`
/// - Path separators become spaces and whitespace runs become `_`
/// - Anything outside `[A-Za-z0-9_.-]` is removed
/// - Leading and trailing `.` and `_` are trimmed
///
/// The result may be empty; callers must check.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename.nfkd().filter(char::is_ascii).collect();
    let flat = ascii.replace(['/', '\\'], " ");
    let joined = flat.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_CHARS_REGEX.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    let device = trimmed.split('.').next().unwrap_or_default().to_uppercase();
    if !trimmed.is_empty() && WINDOWS_DEVICE_NAMES.contains(&device.as_str()) {
        format!("_{}", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// The base name without its last extension, e.g. `"q3.notes"` for `"q3.notes.txt"`.
pub fn file_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}
