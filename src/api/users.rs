//! User registration endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::user::{CreateUser, User},
    AppState,
};

use super::{ApiJson, SuccessResponse};

/// Register a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User registered", body = SuccessResponse),
        (status = 422, description = "Invalid email, age or interests", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(user): ApiJson<CreateUser>,
) -> AppResult<Json<SuccessResponse>> {
    state.services.users.create_user(user).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// List registered users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users, oldest first", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.services.users.list_users().await)
}
