//! Repository layer: book and user storage

pub mod books;
pub mod users;

use std::sync::Arc;

use crate::{
    config::{AppConfig, StorageBackend},
    error::AppResult,
    models::Book,
};

pub use books::{BookStore, MemoryBookStore, SqliteBookStore};
pub use users::UsersRepository;

/// Main repository struct holding every store
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
    pub users: UsersRepository,
}

impl Repository {
    /// Create a repository over the given book store and an empty user registry
    pub fn new(books: Arc<dyn BookStore>) -> Self {
        Self {
            books,
            users: UsersRepository::new(),
        }
    }

    /// Build the book store selected by `storage.backend`
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let books: Arc<dyn BookStore> = match config.storage.backend {
            StorageBackend::Memory => {
                let seed = if config.storage.seed_demo_books {
                    Book::demo_books()
                } else {
                    Vec::new()
                };
                tracing::info!("Using in-memory book store ({} books)", seed.len());
                Arc::new(MemoryBookStore::with_books(seed))
            }
            StorageBackend::Sqlite => {
                let store = SqliteBookStore::connect(
                    &config.database.url,
                    config.database.max_connections,
                )
                .await?;
                tracing::info!("Connected to database {}", config.database.url);
                Arc::new(store)
            }
        };

        Ok(Self::new(books))
    }
}
