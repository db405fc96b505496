//! API integration tests

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{
    api::create_router,
    repository::{MemoryBookStore, Repository, SqliteBookStore},
    config::StorageBackend,
    AppConfig, AppState,
};

async fn sqlite_app() -> Router {
    let store = SqliteBookStore::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    create_router(AppState::new(AppConfig::default(), Repository::new(Arc::new(store))))
}

fn memory_app() -> Router {
    let store = MemoryBookStore::new();
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Memory;
    create_router(AppState::new(config, Repository::new(Arc::new(store))))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone()
        .oneshot(request)
        .await
        .expect("Failed to send request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Failed to parse response")
}

fn user(age: i64, interests: Option<String>) -> Value {
    json!({
        "id": 1,
        "email": "reader@example.com",
        "age": age,
        "interests": interests,
        "password": "secret"
    })
}

/// Register a user, log in and return the `name=value` cookie pair
async fn login_cookie(app: &Router) -> String {
    let response = send(app, post_json("/users", user(30, None), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        app,
        post_json(
            "/login",
            json!({"email": "reader@example.com", "password": "secret"}),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("No cookie set")
        .to_string();
    set_cookie
        .split(';')
        .next()
        .expect("Empty cookie")
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = memory_app();
    let response = send(&app, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["books"], 0);

    let response = send(&sqlite_app().await, get("/health")).await;
    assert_eq!(body_json(response).await["storage"], "sqlite");
}

/// Assert a rejection carries the JSON error body rather than plain text
async fn assert_error_body(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"), "got {}", content_type);

    let body = body_json(response).await;
    assert!(body["code"].is_number());
    assert_eq!(body["error"], "BadValue");
    assert!(body["message"].is_string());
    body
}

#[tokio::test]
async fn test_user_missing_password_is_json_error() {
    let app = memory_app();
    let body = json!({"id": 1, "email": "reader@example.com", "age": 30});

    let response = send(&app, post_json("/users", body, None)).await;
    let error = assert_error_body(response, StatusCode::UNPROCESSABLE_ENTITY).await;
    assert!(error["message"].as_str().unwrap_or_default().contains("password"));
}

#[tokio::test]
async fn test_user_mistyped_age_is_json_error() {
    let app = memory_app();
    let mut body = user(30, None);
    body["age"] = json!("old");

    let response = send(&app, post_json("/users", body, None)).await;
    let error = assert_error_body(response, StatusCode::UNPROCESSABLE_ENTITY).await;
    assert!(error["message"].as_str().unwrap_or_default().contains("age"));
}

#[tokio::test]
async fn test_non_numeric_book_id_is_json_error() {
    let app = sqlite_app().await;
    let response = send(&app, get("/books/abc")).await;
    assert_error_body(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_malformed_login_body_is_json_error() {
    let app = memory_app();
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    assert_error_body(send(&app, request).await, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_add_then_list_preserves_cyrillic() {
    let app = sqlite_app().await;
    let cookie = login_cookie(&app).await;

    let response = send(
        &app,
        post_json(
            "/books",
            json!({"title": "Идиот", "author": "Достоевский"}),
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    let response = send(&app, get("/books")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let books = body.as_array().expect("Expected a list");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Идиот");
    assert_eq!(books[0]["author"], "Достоевский");
}

#[tokio::test]
async fn test_memory_ids_increment_from_count() {
    let app = memory_app();
    let cookie = login_cookie(&app).await;

    for (i, title) in ["Идиот", "Вишневый сад"].iter().enumerate() {
        let response = send(
            &app,
            post_json("/books", json!({"title": title, "author": "-"}), Some(&cookie)),
        )
        .await;
        let body = body_json(response).await;
        assert_eq!(body["book"]["id"], i as i64 + 1);
    }

    let response = send(&app, get("/books/2")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Вишневый сад");
}

#[tokio::test]
async fn test_get_unknown_book() {
    let app = sqlite_app().await;
    let response = send(&app, get("/books/404")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "NoSuchData");
}

#[tokio::test]
async fn test_add_book_requires_cookie() {
    let app = sqlite_app().await;
    let book = json!({"title": "Идиот", "author": "Достоевский"});

    let response = send(&app, post_json("/books", book.clone(), None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        post_json("/books", book.clone(), Some("my_access_token=forged")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // a bearer header is not a substitute for the cookie
    let cookie = login_cookie(&app).await;
    let token = cookie.trim_start_matches("my_access_token=");
    let request = Request::builder()
        .method("POST")
        .uri("/books")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(book.to_string()))
        .unwrap();
    assert_eq!(send(&app, request).await.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, get("/books")).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_user_age_boundaries() {
    let app = memory_app();

    for age in [0, 120] {
        let response = send(&app, post_json("/users", user(age, None), None)).await;
        assert_eq!(response.status(), StatusCode::OK, "age {}", age);
    }
    for age in [-1, 121] {
        let response = send(&app, post_json("/users", user(age, None), None)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "age {}", age);
    }

    let response = send(&app, get("/users")).await;
    let users = body_json(response).await;
    assert_eq!(users.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_user_interests_length() {
    let app = memory_app();

    let response = send(&app, post_json("/users", user(30, Some("x".repeat(500))), None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, post_json("/users", user(30, Some("x".repeat(501))), None)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_user_bad_email() {
    let app = memory_app();
    let mut body = user(30, None);
    body["email"] = json!("not-an-email");

    let response = send(&app, post_json("/users", body, None)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_users_hides_passwords() {
    let app = memory_app();
    send(&app, post_json("/users", user(30, None), None)).await;

    let users = body_json(send(&app, get("/users")).await).await;
    assert_eq!(users[0]["email"], "reader@example.com");
    assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn test_login_sets_cookie_and_returns_token() {
    let app = memory_app();
    send(&app, post_json("/users", user(30, None), None)).await;

    let response = send(
        &app,
        post_json(
            "/login",
            json!({"email": "reader@example.com", "password": "secret"}),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("No cookie set")
        .to_string();
    assert!(set_cookie.starts_with("my_access_token="));
    assert!(set_cookie.contains("HttpOnly"));

    let body = body_json(response).await;
    let token = body["access_token"].as_str().expect("No token in response");
    assert!(!token.is_empty());
    assert!(set_cookie.contains(token));
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = memory_app();
    let response = send(
        &app,
        post_json(
            "/login",
            json!({"email": "ghost@example.com", "password": "secret"}),
            None,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = memory_app();
    send(&app, post_json("/users", user(30, None), None)).await;

    let response = send(
        &app,
        post_json(
            "/login",
            json!({"email": "reader@example.com", "password": "wrong"}),
            None,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_setup_database_empties_books() {
    let app = sqlite_app().await;
    let cookie = login_cookie(&app).await;

    send(
        &app,
        post_json("/books", json!({"title": "a", "author": "b"}), Some(&cookie)),
    )
    .await;

    let response = send(&app, post_json("/setup_database", json!({}), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    let response = send(&app, get("/books")).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_openapi_document() {
    let app = memory_app();
    let response = send(&app, get("/api-docs/openapi.json")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/books"].is_object());
    assert!(body["paths"]["/login"].is_object());
}
