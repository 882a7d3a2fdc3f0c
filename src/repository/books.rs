//! In-memory book store

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::book::{Book, BookDetails, BookFilter, BookSummary};

/// Outcome of a store-level replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replace {
    Replaced,
    /// No record carries the id
    Missing,
    /// The id was found but its slot was gone by the time of the write
    Vanished,
}

/// Ordered collection of book records.
///
/// Clone-friendly via Arc; every clone shares the same records.
#[derive(Clone, Default)]
pub struct BookStore {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Returns `false` and leaves the store untouched when
    /// the id is already taken.
    pub async fn insert(&self, book: Book) -> bool {
        let mut books = self.books.write().await;
        if books.iter().any(|b| b.id == book.id) {
            return false;
        }
        books.push(book);
        true
    }

    /// Summaries of the records matching `filter`, in insertion order
    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books
            .read()
            .await
            .iter()
            .filter(|b| filter.matches(b))
            .map(Book::summary_view)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Option<Book> {
        self.books.read().await.iter().find(|b| b.id == id).cloned()
    }

    /// Overwrite the editable fields of the record with `id`
    pub async fn replace(&self, id: &str, details: BookDetails, now: DateTime<Utc>) -> Replace {
        let mut books = self.books.write().await;
        let Some(index) = books.iter().position(|b| b.id == id) else {
            return Replace::Missing;
        };
        match books.get_mut(index) {
            Some(book) => {
                book.apply(details, now);
                Replace::Replaced
            }
            None => Replace::Vanished,
        }
    }

    /// Remove the first record with `id`, keeping the order of the rest
    pub async fn remove(&self, id: &str) -> Option<Book> {
        let mut books = self.books.write().await;
        let index = books.iter().position(|b| b.id == id)?;
        Some(books.remove(index))
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}
