//! Book storage: in-memory and SQLite backends

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

const CREATE_BOOKS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS books (id INTEGER PRIMARY KEY, title TEXT, author TEXT)";

/// Storage port for the book catalogue
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books in insertion order
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// First book with the given id, scanning in insertion order
    async fn get(&self, id: i64) -> AppResult<Book> {
        self.list()
            .await?
            .into_iter()
            .find(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Store a new book under the next free id and return it
    async fn add(&self, title: String, author: String) -> AppResult<Book>;

    /// Drop every book and start from an empty catalogue
    async fn reset(&self) -> AppResult<()>;
}

/// Process-local catalogue, lost on restart
#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn get(&self, id: i64) -> AppResult<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    async fn add(&self, title: String, author: String) -> AppResult<Book> {
        // id and append under one write lock
        let mut books = self.books.write().await;
        let book = Book {
            id: books.len() as i64 + 1,
            title,
            author,
        };
        books.push(book.clone());
        Ok(book)
    }

    async fn reset(&self) -> AppResult<()> {
        self.books.write().await.clear();
        Ok(())
    }
}

/// Catalogue persisted in a single SQLite table
#[derive(Clone)]
pub struct SqliteBookStore {
    pool: Pool<Sqlite>,
}

impl SqliteBookStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `url` and make sure the
    /// books table exists.
    ///
    /// `sqlite::memory:` databases live inside a single connection, so use
    /// `max_connections = 1` for them.
    pub async fn connect(url: &str, max_connections: u32) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(CREATE_BOOKS_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl BookStore for SqliteBookStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        // Connection goes back to the pool when `conn` drops
        let mut conn = self.pool.acquire().await?;
        let books = sqlx::query_as::<_, Book>("SELECT id, title, author FROM books ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;
        Ok(books)
    }

    async fn add(&self, title: String, author: String) -> AppResult<Book> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("INSERT INTO books (title, author) VALUES (?, ?)")
            .bind(&title)
            .bind(&author)
            .execute(&mut *conn)
            .await?;

        Ok(Book {
            id: result.last_insert_rowid(),
            title,
            author,
        })
    }

    async fn reset(&self) -> AppResult<()> {
        // Rolled back on drop if either statement fails
        let mut tx = self.pool.begin().await?;
        sqlx::query("DROP TABLE IF EXISTS books")
            .execute(&mut *tx)
            .await?;
        sqlx::query(CREATE_BOOKS_TABLE).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
