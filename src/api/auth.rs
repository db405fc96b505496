//! Authentication endpoints

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult, models::user::LoginRequest, services::auth::ACCESS_TOKEN_COOKIE, AppState,
};

use super::ApiJson;

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Log in with email and password
///
/// The token is returned in the body and set as the access token cookie.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Wrong password", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown email", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(request): ApiJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let token = state
        .services
        .auth
        .login(&request.email, &request.password)
        .await?;

    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.auth.secure_cookie);

    Ok((jar.add(cookie), Json(LoginResponse { access_token: token })))
}
