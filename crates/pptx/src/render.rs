//! PPTX slideshow rendering.

use crate::background::BackgroundImage;
use crate::deck::{plan_slides, Slide};
use crate::parts;
use slidegen_core::{CaptionSet, Error, RenderConfig, Result, TextColor};
use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Renderer producing a widescreen PPTX deck from captions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideshowRenderer;

impl SlideshowRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render the caption JSON file at `json_path` into a `.pptx` beside it.
    ///
    /// The deck title is the JSON file name without its extension. Returns
    /// the path of the written presentation.
    pub fn render_json(&self, json_path: &Path, config: &RenderConfig) -> Result<PathBuf> {
        let captions = CaptionSet::read_json(json_path)?;
        let title = json_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::InvalidFilename(json_path.display().to_string()))?;

        let out_path = json_path.with_extension("pptx");
        self.render(&captions, title, config, &out_path)?;
        Ok(out_path)
    }

    /// Render captions to `out_path`, replacing any existing file there.
    pub fn render(
        &self,
        captions: &CaptionSet,
        title: &str,
        config: &RenderConfig,
        out_path: &Path,
    ) -> Result<()> {
        let slides = plan_slides(title, captions);

        // The image is only read when some slide shows it.
        let image = if slides.iter().any(Slide::uses_background_image) {
            Some(BackgroundImage::load(&config.background_image)?)
        } else {
            None
        };

        if out_path.exists() {
            log::info!("Replacing existing presentation {}", out_path.display());
            fs::remove_file(out_path)?;
        }

        let dir = match out_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        self.write_package(temp.as_file_mut(), &slides, config.text_color, image.as_ref())?;
        temp.as_file().sync_all()?;
        temp.persist(out_path).map_err(|e| Error::Io(e.error))?;

        log::info!(
            "Wrote {} slides ({} captions, {} text) to {}",
            slides.len(),
            captions.len(),
            config.text_color,
            out_path.display()
        );
        Ok(())
    }

    /// Write a complete presentation package for `slides` into `writer`.
    pub fn write_package<W: Write + Seek>(
        &self,
        writer: W,
        slides: &[Slide],
        color: TextColor,
        image: Option<&BackgroundImage>,
    ) -> Result<W> {
        let mut package = PackageWriter::new(writer);

        package.add_part("[Content_Types].xml", &parts::content_types(slides.len(), image)?)?;
        package.add_part("_rels/.rels", &parts::root_rels()?)?;
        let title = match slides.first() {
            Some(Slide::Title { text }) => text.as_str(),
            _ => "",
        };
        package.add_part("docProps/core.xml", &parts::core_properties(title)?)?;
        package.add_part("docProps/app.xml", &parts::app_properties(slides.len())?)?;
        package.add_part("ppt/presentation.xml", &parts::presentation(slides.len())?)?;
        package.add_part(
            "ppt/_rels/presentation.xml.rels",
            &parts::presentation_rels(slides.len())?,
        )?;

        for (path, content) in parts::STATIC_PARTS {
            package.add_part(path, content.as_bytes())?;
        }

        for (idx, slide) in slides.iter().enumerate() {
            let number = idx + 1;
            package.add_part(&parts::slide_part_name(number), &parts::slide(slide, color)?)?;
            package.add_part(
                &parts::slide_rels_part_name(number),
                &parts::slide_rels(slide, image)?,
            )?;
        }

        if let Some(image) = image {
            package.add_media(&image.part_name(), image.bytes())?;
        }

        package.finish()
    }
}

/// Thin wrapper over the ZIP writer mapping its errors into ours.
struct PackageWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
}

impl<W: Write + Seek> PackageWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
        }
    }

    fn add_part(&mut self, path: &str, content: &[u8]) -> Result<()> {
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.add(path, content, options)
    }

    /// Media is already compressed; store it as is.
    fn add_media(&mut self, path: &str, content: &[u8]) -> Result<()> {
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);
        self.add(path, content, options)
    }

    fn add(&mut self, path: &str, content: &[u8], options: FileOptions) -> Result<()> {
        self.zip
            .start_file(path, options)
            .map_err(|e| Error::Zip(format!("Failed to add '{}': {}", path, e)))?;
        self.zip.write_all(content)?;
        Ok(())
    }

    fn finish(mut self) -> Result<W> {
        self.zip
            .finish()
            .map_err(|e| Error::Zip(format!("Failed to finish package: {}", e)))
    }
}
