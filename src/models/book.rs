//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Catalogue entry, as stored and as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
}

impl Book {
    /// The two titles the in-memory catalogue can start with
    pub fn demo_books() -> Vec<Book> {
        vec![
            Book {
                id: 1,
                title: "Идиот".to_string(),
                author: "Достоевский".to_string(),
            },
            Book {
                id: 2,
                title: "Вишневый сад".to_string(),
                author: "Чехов".to_string(),
            },
        ]
    }
}
