//! Core domain types, caption parsing, and upload filename rules
//! for text-to-slideshow conversion.

pub mod error;
pub mod filename;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
pub use filename::{allowed_file, file_stem, secure_filename};
pub use parser::TextParser;
pub use types::{CaptionEntry, CaptionSet, RenderConfig, TextColor};
