//! Error types for Bookshelf server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Book operation an error was raised from; selects the response message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    Add,
    Get,
    Update,
    Delete,
}

impl std::fmt::Display for BookAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookAction::Add => "add",
            BookAction::Get => "get",
            BookAction::Update => "update",
            BookAction::Delete => "delete",
        };
        write!(f, "{}", label)
    }
}

/// Envelope status of a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    /// Client-side failure (4xx)
    Fail,
    /// Server-side failure (5xx)
    Error,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}: book name is missing")]
    MissingName(BookAction),

    #[error("{0}: readPage exceeds pageCount")]
    ReadPageExceedsPageCount(BookAction),

    #[error("{0}: book not found")]
    NotFound(BookAction),

    /// Update passed its lookup but the record was gone at write time
    #[error("update: book vanished before write")]
    UpdateFailed,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingName(_)
            | AppError::ReadPageExceedsPageCount(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::UpdateFailed => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message
    pub fn message(&self) -> String {
        let text = match self {
            AppError::MissingName(BookAction::Update) => {
                "Gagal memperbarui buku. Mohon isi nama buku"
            }
            AppError::MissingName(_) => "Gagal menambahkan buku. Mohon isi nama buku",
            AppError::ReadPageExceedsPageCount(BookAction::Update) => {
                "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
            }
            AppError::ReadPageExceedsPageCount(_) => {
                "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
            }
            AppError::NotFound(BookAction::Update) => "Gagal memperbarui buku. Id tidak ditemukan",
            AppError::NotFound(BookAction::Delete) => "Buku gagal dihapus. Id tidak ditemukan",
            AppError::NotFound(_) => "Buku tidak ditemukan",
            AppError::UpdateFailed => "Gagal memperbarui catatan. Id tidak ditemukan",
            AppError::BadRequest(msg) => return msg.clone(),
            AppError::Internal(_) => "Catatan gagal ditambahkan",
        };
        text.to_string()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let envelope = if status.is_server_error() {
            tracing::error!("Internal error: {}", self);
            ResponseStatus::Error
        } else {
            tracing::debug!("Request rejected: {}", self);
            ResponseStatus::Fail
        };

        let body = Json(ErrorResponse {
            status: envelope,
            message: self.message(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
