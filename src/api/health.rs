//! Liveness endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, AppState};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Backend holding the book catalogue: `sqlite` or `memory`
    pub storage: String,
    pub books: usize,
}

/// Report service status and the size of the catalogue
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Book store reachable", body = HealthResponse),
        (status = 500, description = "Book store unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let books = state.services.catalog.list_books().await?.len();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.config.storage.backend.as_str().to_string(),
        books,
    }))
}
