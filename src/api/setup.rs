//! Database maintenance endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, AppState};

use super::SuccessResponse;

/// Drop and recreate the books table
#[utoipa::path(
    post,
    path = "/setup_database",
    tag = "maintenance",
    responses(
        (status = 200, description = "Books table recreated empty", body = SuccessResponse)
    )
)]
pub async fn setup_database(State(state): State<AppState>) -> AppResult<Json<SuccessResponse>> {
    state.services.catalog.reset().await?;
    Ok(Json(SuccessResponse::ok()))
}
