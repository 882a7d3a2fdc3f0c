//! Bookshelf service: validation and record lifecycle

use chrono::Utc;

use crate::{
    error::{AppError, AppResult, BookAction},
    models::book::{generate_book_id, Book, BookDetails, BookPayload, BookQuery, BookSummary},
    repository::{books::Replace, Repository},
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a book and return its generated id
    pub async fn create(&self, payload: BookPayload) -> AppResult<String> {
        let details = validate(payload, BookAction::Add)?;
        self.store_new(generate_book_id(), details).await
    }

    /// Append a validated book under `id`; a taken id is an internal failure
    async fn store_new(&self, id: String, details: BookDetails) -> AppResult<String> {
        let book = Book::new(id.clone(), details, Utc::now());

        if !self.repository.books.insert(book).await {
            return Err(AppError::Internal(format!("Book id {} already in use", id)));
        }

        tracing::info!(book_id = %id, "Book created");
        Ok(id)
    }

    /// List book summaries matching the query filters
    pub async fn list(&self, query: &BookQuery) -> Vec<BookSummary> {
        self.repository.books.list(&query.filter()).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books
            .get(id)
            .await
            .ok_or(AppError::NotFound(BookAction::Get))
    }

    /// Replace the editable fields of a book.
    ///
    /// Payload checks run before the id lookup, so an invalid payload for an
    /// unknown id is reported as invalid rather than missing.
    pub async fn update(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        let details = validate(payload, BookAction::Update)?;

        match self.repository.books.replace(id, details, Utc::now()).await {
            Replace::Replaced => {
                tracing::info!(book_id = %id, "Book updated");
                Ok(())
            }
            Replace::Missing => Err(AppError::NotFound(BookAction::Update)),
            Replace::Vanished => Err(AppError::UpdateFailed),
        }
    }

    /// Number of books currently held
    pub async fn count(&self) -> usize {
        self.repository.books.len().await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository
            .books
            .remove(id)
            .await
            .ok_or(AppError::NotFound(BookAction::Delete))?;

        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }
}

/// Check name presence then the page relation.
///
/// A payload missing either page count fails the relation check.
fn validate(payload: BookPayload, action: BookAction) -> AppResult<BookDetails> {
    // `"name": null` deserializes to None and counts as absent
    let name = payload.name.ok_or(AppError::MissingName(action))?;
    let (page_count, read_page) = match (payload.page_count, payload.read_page) {
        (Some(page_count), Some(read_page)) if read_page <= page_count => {
            (page_count, read_page)
        }
        _ => return Err(AppError::ReadPageExceedsPageCount(action)),
    };

    Ok(BookDetails {
        name,
        year: payload.year,
        author: payload.author,
        summary: payload.summary,
        publisher: payload.publisher,
        page_count,
        read_page,
        reading: payload.reading,
    })
}
