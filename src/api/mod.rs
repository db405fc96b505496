//! API handlers for Bookshelf REST endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod openapi;
pub mod setup;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError, models::user::TokenClaims, services::auth::ACCESS_TOKEN_COOKIE, AppState,
};

/// Plain acknowledgement body
#[derive(Serialize, utoipa::ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// JSON body extractor whose rejections use the `ErrorResponse` body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections use the `ErrorResponse` body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Extractor for the user behind the access token cookie.
///
/// Only the cookie is consulted; `Authorization` headers are ignored.
pub struct AuthenticatedUser(pub TokenClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::Authentication("Missing access token".to_string()))?;

        let claims = state.services.auth.verify(&token)?;
        Ok(AuthenticatedUser(claims))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        .route("/health", get(health::health_check))
        // Books
        .route("/books", get(books::list_books).post(books::add_book))
        .route("/books/:id", get(books::get_book))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        // Authentication
        .route("/login", post(auth::login))
        // Maintenance
        .route("/setup_database", post(setup::setup_database))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
