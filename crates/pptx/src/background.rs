//! Background image loading.

use image::ImageFormat;
use slidegen_core::{Error, Result};
use std::path::Path;

/// An image that has been recognized and decoded once, ready to embed.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl BackgroundImage {
    /// Read and validate an image file. Only PNG and JPEG are embedded.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes).map_err(|e| match e {
            Error::Image(msg) => Error::Image(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Recognize the format from the bytes themselves and make sure the
    /// image decodes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&bytes)
            .map_err(|e| Error::Image(format!("Unrecognized image data: {}", e)))?;

        if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
            return Err(Error::Image(format!("Unsupported image format: {:?}", format)));
        }

        let decoded = image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| Error::Image(format!("Corrupt {:?} image: {}", format, e)))?;
        log::debug!(
            "Background image: {:?} {}x{}",
            format,
            decoded.width(),
            decoded.height()
        );

        Ok(Self { bytes, format })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File extension used for the media part.
    pub fn extension(&self) -> &'static str {
        match self.format {
            ImageFormat::Jpeg => "jpeg",
            _ => "png",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self.format {
            ImageFormat::Jpeg => "image/jpeg",
            _ => "image/png",
        }
    }

    /// Package path of the embedded media part.
    pub fn part_name(&self) -> String {
        format!("ppt/media/image1.{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(4, 3, Rgb([20, 40, 80]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
        buf
    }

    #[test]
    fn test_png_detected() {
        let bg = BackgroundImage::from_bytes(encoded(ImageFormat::Png)).unwrap();
        assert_eq!(bg.extension(), "png");
        assert_eq!(bg.content_type(), "image/png");
        assert_eq!(bg.part_name(), "ppt/media/image1.png");
    }

    #[test]
    fn test_jpeg_detected() {
        let bg = BackgroundImage::from_bytes(encoded(ImageFormat::Jpeg)).unwrap();
        assert_eq!(bg.extension(), "jpeg");
        assert_eq!(bg.content_type(), "image/jpeg");
    }

    #[test]
    fn test_text_is_not_an_image() {
        let err = BackgroundImage::from_bytes(b"Revenue: $5M\n".to_vec()).unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }

    #[test]
    fn test_truncated_png_is_rejected() {
        let mut bytes = encoded(ImageFormat::Png);
        bytes.truncate(20);
        let err = BackgroundImage::from_bytes(bytes).unwrap_err();
        assert!(matches!(err, Error::Image(_)));
    }
}
