//! OpenAPI documentation

use axum::{routing::get, Json, Router};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::{
    api::{auth, books, health, setup, users},
    services::auth::ACCESS_TOKEN_COOKIE,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.4.0",
        description = "Book catalogue and user registry REST API"
    ),
    paths(
        health::health_check,
        books::list_books,
        books::get_book,
        books::add_book,
        users::create_user,
        users::list_users,
        auth::login,
        setup::setup_database,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::CreateBook,
            books::AddBookResponse,
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::LoginRequest,
            auth::LoginResponse,
            crate::api::SuccessResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&CookieAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalogue"),
        (name = "users", description = "User registry"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "maintenance", description = "Database maintenance")
    )
)]
pub struct ApiDoc;

struct CookieAuth;

impl Modify for CookieAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(ACCESS_TOKEN_COOKIE))),
            );
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}
