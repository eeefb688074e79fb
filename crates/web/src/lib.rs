//! Web upload form for turning line-per-slide text files into PPTX slideshows.
//!
//! Routes:
//! - `GET /` upload form with pending notices
//! - `POST /` convert an uploaded text file and background image
//! - `GET /download/:filename` fetch a generated file from the upload directory
//! - `GET /health` liveness probe

pub mod config;
pub mod flash;
pub mod pages;
pub mod upload;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{DefaultBodyLimit, Path as AxumPath, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use slidegen_core::secure_filename;
use std::path::Path;
use std::sync::Arc;

pub use config::ServerConfig;
pub use flash::{Flash, FlashSigner};
use upload::{UploadForm, UploadRejection};

const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub flash: FlashSigner,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            flash: FlashSigner::new(&config.secret_key),
            config: Arc::new(config),
        }
    }

    /// Redirect to `location`, queueing `notice` after any unread ones.
    fn redirect_with(&self, headers: &HeaderMap, notice: Flash, location: &str) -> Response {
        let mut flashes = self.flash.read(headers);
        flashes.push(notice);
        (
            [(header::SET_COOKIE, self.flash.set_cookie(&flashes))],
            Redirect::to(location),
        )
            .into_response()
    }

    /// The upload form, consuming pending notices.
    fn form_page(&self, headers: &HeaderMap) -> Response {
        let flashes = self.flash.read(headers);
        let page = pages::render_index(&flashes);
        if flash::has_cookie(headers) {
            ([(header::SET_COOKIE, flash::clear_cookie())], page).into_response()
        } else {
            page.into_response()
        }
    }
}

/// Errors a handler can end with.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("No such file: {0}")]
    NotFound(String),

    #[error("Conversion failed: {0}")]
    Conversion(#[from] slidegen_core::Error),

    #[error("Conversion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Multipart(e) => {
                log::warn!("Rejected upload: {}", e);
                (e.status(), e.body_text()).into_response()
            }
            Self::NotFound(name) => {
                log::debug!("Download not found: {:?}", name);
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
            other => {
                log::error!("{}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

/// Build the application router.
pub fn router(config: ServerConfig) -> Router {
    let body_limit = config.max_upload_bytes;

    Router::new()
        .route("/", get(index).post(upload))
        .route("/download/:filename", get(download))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(AppState::new(config))
}

async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state.form_page(&headers)
}

async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = UploadForm::from_multipart(multipart).await?;

    let upload = match form.validate() {
        Ok(upload) => upload,
        Err(UploadRejection::DisallowedExtension { text, image }) => {
            log::warn!("Ignoring upload with disallowed file type: {:?}, {:?}", text, image);
            return Ok(state.form_page(&headers));
        }
        Err(rejection) => {
            log::info!("Rejected upload: {}", rejection);
            return Ok(state.redirect_with(&headers, Flash::error(rejection.to_string()), "/"));
        }
    };

    let upload_dir = state.config.upload_dir.clone();
    let conversion =
        tokio::task::spawn_blocking(move || upload.save_and_convert(&upload_dir)).await??;

    let name = conversion
        .pptx_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    log::info!(
        "Created {} with {} slides",
        conversion.pptx_path.display(),
        conversion.slide_count()
    );

    Ok(state.redirect_with(
        &headers,
        Flash::success("Presentation created successfully!"),
        &format!("/download/{}", name),
    ))
}

async fn download(
    State(state): State<AppState>,
    AxumPath(filename): AxumPath<String>,
) -> Result<Response, AppError> {
    if secure_filename(&filename) != filename {
        return Err(AppError::NotFound(filename));
    }

    let path = state.config.upload_dir.join(&filename);
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(AppError::NotFound(filename)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(filename))
        }
        Err(e) => return Err(e.into()),
    }

    let bytes = tokio::fs::read(&path).await?;
    let headers = [
        (header::CONTENT_TYPE, content_type(&filename).to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    Ok((headers, bytes).into_response())
}

fn content_type(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("pptx") => PPTX_CONTENT_TYPE,
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[derive(Serialize)]
struct HealthRes {
    ok: bool,
}

async fn health() -> Json<HealthRes> {
    Json(HealthRes { ok: true })
}
