//! Text file to slideshow conversion.
//!
//! `notes.txt` → `notes.json` (captions) → `notes.pptx`, all in the text
//! file's directory.

use crate::render::SlideshowRenderer;
use slidegen_core::{RenderConfig, Result, TextParser};
use std::path::{Path, PathBuf};

/// Files produced by one conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Intermediate caption JSON.
    pub json_path: PathBuf,

    /// Generated presentation.
    pub pptx_path: PathBuf,

    /// Number of captions, i.e. content slides.
    pub caption_count: usize,
}

impl Conversion {
    /// Slides in the presentation: title, captions, closing.
    pub fn slide_count(&self) -> usize {
        self.caption_count + 2
    }
}

/// Convert a text file into a presentation next to it.
pub fn convert(text_path: &Path, config: &RenderConfig) -> Result<Conversion> {
    let captions = TextParser::new().parse_file(text_path)?;

    let json_path = text_path.with_extension("json");
    captions.write_json(&json_path)?;

    let pptx_path = SlideshowRenderer::new().render_json(&json_path, config)?;

    Ok(Conversion {
        json_path,
        pptx_path,
        caption_count: captions.len(),
    })
}
