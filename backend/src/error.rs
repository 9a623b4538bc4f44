//! Error type shared by every backend action.
//!
//! Each variant maps to one HTTP status through `ResponseError`, so handlers can
//! propagate with `?` and still answer the client with a readable message.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::auth::Action;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Workbook read error: {0}")]
    WorkbookRead(#[from] calamine::XlsxError),

    #[error("Workbook write error: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Credentials file error: {0}")]
    Credentials(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Kept as text: the multipart error can wrap a non-`Send` actix error.
    #[error("Upload error: {0}")]
    Multipart(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unknown or expired session")]
    UnknownSession,

    #[error("You don't have permission to {0}")]
    Forbidden(Action),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, CmsError>;

impl From<actix_multipart::MultipartError> for CmsError {
    fn from(e: actix_multipart::MultipartError) -> Self {
        CmsError::Multipart(e.to_string())
    }
}

impl ResponseError for CmsError {
    fn status_code(&self) -> StatusCode {
        match self {
            CmsError::InvalidCredentials | CmsError::UnknownSession => StatusCode::UNAUTHORIZED,
            CmsError::Forbidden(_) => StatusCode::FORBIDDEN,
            CmsError::InvalidInput(_) | CmsError::Multipart(_) => StatusCode::BAD_REQUEST,
            CmsError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(format!("Error: {}", self))
    }
}
