//! Storage seam for book records.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::models::{Book, BookDraft};

/// Ordered collection of books shared by every handler
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Append a book at the end of the collection
    async fn insert(&self, book: Book) -> anyhow::Result<()>;

    /// Snapshot of every book in insertion order
    async fn list(&self) -> anyhow::Result<Vec<Book>>;

    async fn find(&self, id: &str) -> anyhow::Result<Option<Book>>;

    async fn contains(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.find(id).await?.is_some())
    }

    /// Apply `draft` to the book with `id`; false when no such book exists
    async fn update(
        &self,
        id: &str,
        draft: BookDraft,
        updated_at: OffsetDateTime,
    ) -> anyhow::Result<bool>;

    /// Remove the book with `id`; false when no such book exists
    async fn remove(&self, id: &str) -> anyhow::Result<bool>;

    async fn count(&self) -> anyhow::Result<usize>;
}

pub type SharedBookRepository = Arc<dyn BookRepository>;

/// Process-lifetime store backed by a lock-guarded `Vec`.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedBookRepository {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn insert(&self, book: Book) -> anyhow::Result<()> {
        self.books.write().await.push(book);
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn find(&self, id: &str) -> anyhow::Result<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.iter().find(|book| book.id == id).cloned())
    }

    async fn contains(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.books.read().await.iter().any(|book| book.id == id))
    }

    async fn update(
        &self,
        id: &str,
        draft: BookDraft,
        updated_at: OffsetDateTime,
    ) -> anyhow::Result<bool> {
        let mut books = self.books.write().await;
        match books.iter_mut().find(|book| book.id == id) {
            Some(book) => {
                book.apply(draft, updated_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: &str) -> anyhow::Result<bool> {
        let mut books = self.books.write().await;
        match books.iter().position(|book| book.id == id) {
            Some(index) => {
                books.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> anyhow::Result<usize> {
        Ok(self.books.read().await.len())
    }
}
