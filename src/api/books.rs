//! Book catalogue endpoints

use axum::{
    extract::State,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook},
    AppState,
};

use super::{ApiJson, ApiPath, AuthenticatedUser};

#[derive(Serialize, ToSchema)]
pub struct AddBookResponse {
    pub success: bool,
    pub book: Book,
}

/// List every book in the catalogue
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books, oldest first", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Malformed id", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Add a book (requires the access token cookie)
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("cookie_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 200, description = "Book added", body = AddBookResponse),
        (status = 401, description = "Missing or invalid access token", body = crate::error::ErrorResponse),
        (status = 422, description = "Missing or mistyped fields", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ApiJson(book): ApiJson<CreateBook>,
) -> AppResult<Json<AddBookResponse>> {
    tracing::debug!(user_id = claims.user_id, "Adding book");
    let book = state.services.catalog.add_book(book).await?;
    Ok(Json(AddBookResponse { success: true, book }))
}
