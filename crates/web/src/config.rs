//! Server configuration.
//!
//! Every setting can come from a flag or an environment variable; a `.env`
//! file is loaded first when present.

use clap::Parser;
use std::path::PathBuf;

/// Default request body cap: 16 MiB covers a text file and a photo.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Configuration for the upload server, fixed at startup.
#[derive(Parser, Debug, Clone)]
#[command(name = "slidegen-web")]
#[command(author, version, about = "Upload a text file and an image, download a slideshow", long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long = "addr", env = "SLIDEGEN_ADDR", default_value = "127.0.0.1:5000")]
    pub bind_addr: String,

    /// Directory for uploads, caption JSON and generated decks
    #[arg(long, env = "SLIDEGEN_UPLOAD_DIR", default_value = "upload")]
    pub upload_dir: PathBuf,

    /// Key signing the flash-notice cookie
    #[arg(long, env = "SLIDEGEN_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "SLIDEGEN_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerConfig {
    /// Configuration with default address and limits.
    pub fn new(upload_dir: impl Into<PathBuf>, secret_key: impl Into<String>) -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            upload_dir: upload_dir.into(),
            secret_key: secret_key.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            verbose: false,
        }
    }

    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "slidegen-web",
            "--secret-key",
            "s3cret",
            "--upload-dir",
            "/tmp/slides",
            "--addr",
            "0.0.0.0:8080",
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/slides"));
        assert_eq!(config.secret_key, "s3cret");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_builder_defaults() {
        let config = ServerConfig::new("upload", "key").with_max_upload_bytes(1024);
        assert_eq!(config.upload_dir, PathBuf::from("upload"));
        assert_eq!(config.max_upload_bytes, 1024);
        assert!(!config.verbose);
    }
}
