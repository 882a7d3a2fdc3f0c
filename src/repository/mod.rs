//! Repository layer holding the in-memory records

pub mod books;

pub use books::BookStore;

/// Main repository struct holding every store
#[derive(Clone, Default)]
pub struct Repository {
    pub books: BookStore,
}

impl Repository {
    /// Create a repository with empty stores
    pub fn new() -> Self {
        Self::default()
    }
}
