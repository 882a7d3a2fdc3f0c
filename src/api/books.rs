//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::{Query, WithRejection};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, ErrorResponse, ResponseStatus},
    models::book::{Book, BookPayload, BookQuery, BookSummary},
};

/// Success envelope carrying only a message
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl MessageResponse {
    fn success(message: &str) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CreatedBook {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct BookCreatedResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub data: CreatedBook,
}

#[derive(Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub status: ResponseStatus,
    pub data: BookList,
}

#[derive(Serialize, ToSchema)]
pub struct BookDetail {
    pub book: Book,
}

#[derive(Serialize, ToSchema)]
pub struct BookDetailResponse {
    pub status: ResponseStatus,
    pub data: BookDetail,
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added", body = BookCreatedResponse),
        (
            status = 400,
            description = "Missing name or readPage above pageCount",
            body = ErrorResponse
        ),
        (status = 500, description = "Book could not be stored", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<(StatusCode, Json<BookCreatedResponse>)> {
    let book_id = state.services.books.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookCreatedResponse {
            status: ResponseStatus::Success,
            message: "Buku berhasil ditambahkan".to_string(),
            data: CreatedBook { book_id },
        }),
    ))
}

/// List books, optionally filtered.
///
/// Never rejects: an unreadable query string lists every book.
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Book summaries", body = BookListResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    query: Option<Query<BookQuery>>,
) -> Json<BookListResponse> {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let books = state.services.books.list(&query).await;

    Json(BookListResponse {
        status: ResponseStatus::Success,
        data: BookList { books },
    })
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetailResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookDetailResponse>> {
    let book = state.services.books.get_by_id(&id).await?;

    Ok(Json(BookDetailResponse {
        status: ResponseStatus::Success,
        data: BookDetail { book },
    }))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (
            status = 400,
            description = "Missing name or readPage above pageCount",
            body = ErrorResponse
        ),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.update(&id, payload).await?;
    Ok(Json(MessageResponse::success("Buku berhasil diperbarui")))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(&id).await?;
    Ok(Json(MessageResponse::success("Buku berhasil dihapus")))
}
