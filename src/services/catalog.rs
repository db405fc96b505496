//! Catalog management service

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get(id).await
    }

    pub async fn add_book(&self, book: CreateBook) -> AppResult<Book> {
        let created = self.repository.books.add(book.title, book.author).await?;
        tracing::info!(book_id = created.id, "Book added");
        Ok(created)
    }

    /// Destroy the catalogue and recreate it empty
    pub async fn reset(&self) -> AppResult<()> {
        self.repository.books.reset().await?;
        tracing::warn!("Books table recreated");
        Ok(())
    }
}
