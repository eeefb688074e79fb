//! Error types for text-to-slideshow conversion.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing captions or rendering a slideshow.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read, or write a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The intermediate caption file could not be read or written as JSON.
    #[error("Caption JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The background image could not be recognized or decoded.
    #[error("Background image error: {0}")]
    Image(String),

    /// ZIP archive error (PPTX package).
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML writing or parsing error (PPTX parts).
    #[error("XML error: {0}")]
    Xml(String),

    /// An uploaded filename has nothing left after sanitizing.
    #[error("Invalid filename: {0:?}")]
    InvalidFilename(String),

    /// A presentation package is missing a required part.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),
}
