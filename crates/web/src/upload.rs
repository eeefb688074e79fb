//! Multipart upload handling: collect the form, check it, save and convert.

use axum::extract::multipart::{Multipart, MultipartError};
use slidegen_core::{allowed_file, secure_filename, Error, RenderConfig, Result, TextColor};
use slidegen_pptx::Conversion;
use std::path::{Path, PathBuf};

/// A file part of the upload form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied name, unsanitized.
    pub filename: String,
    pub data: Vec<u8>,
}

/// The upload form as submitted. File fields without a filename are absent.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub text_file: Option<UploadedFile>,
    pub image_file: Option<UploadedFile>,
    pub color: Option<String>,
}

/// Why a submission was not converted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("Please upload both a text file and an image.")]
    MissingFile,

    #[error("Please select both a text file and an image.")]
    EmptyFilename,

    #[error("Disallowed file type: {text:?}, {image:?}")]
    DisallowedExtension { text: String, image: String },
}

impl UploadForm {
    /// Drain a multipart stream into a form. Unknown fields are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> std::result::Result<Self, MultipartError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            let filename = field.file_name().map(str::to_string);

            match (name.as_str(), filename) {
                ("file", Some(filename)) => {
                    let data = field.bytes().await?.to_vec();
                    form.text_file = Some(UploadedFile { filename, data });
                }
                ("image", Some(filename)) => {
                    let data = field.bytes().await?.to_vec();
                    form.image_file = Some(UploadedFile { filename, data });
                }
                ("color", _) => form.color = Some(field.text().await?),
                _ => log::debug!("Skipping form field {:?}", name),
            }
        }

        Ok(form)
    }

    /// Check the form in submission order: presence, then names, then extensions.
    pub fn validate(self) -> std::result::Result<ValidUpload, UploadRejection> {
        let (Some(text), Some(image)) = (self.text_file, self.image_file) else {
            return Err(UploadRejection::MissingFile);
        };
        if text.filename.is_empty() || image.filename.is_empty() {
            return Err(UploadRejection::EmptyFilename);
        }
        if !allowed_file(&text.filename) || !allowed_file(&image.filename) {
            return Err(UploadRejection::DisallowedExtension {
                text: text.filename,
                image: image.filename,
            });
        }

        let color = TextColor::resolve(self.color.as_deref().unwrap_or_default());
        Ok(ValidUpload { text, image, color })
    }
}

/// A submission that passed validation.
#[derive(Debug)]
pub struct ValidUpload {
    pub text: UploadedFile,
    pub image: UploadedFile,
    pub color: TextColor,
}

impl ValidUpload {
    /// Save both files into `upload_dir` under sanitized names and build the deck.
    ///
    /// Blocking; run it off the async executor.
    pub fn save_and_convert(&self, upload_dir: &Path) -> Result<Conversion> {
        let text_path = save(&self.text, upload_dir)?;
        let image_path = save(&self.image, upload_dir)?;
        log::info!(
            "Saved {} and {}",
            text_path.display(),
            image_path.display()
        );

        slidegen_pptx::convert(&text_path, &RenderConfig::new(image_path, self.color))
    }
}

fn save(file: &UploadedFile, dir: &Path) -> Result<PathBuf> {
    let name = secure_filename(&file.filename);
    if name.is_empty() {
        return Err(Error::InvalidFilename(file.filename.clone()));
    }
    let path = dir.join(name);
    std::fs::write(&path, &file.data)?;
    Ok(path)
}
