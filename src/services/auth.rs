//! Authentication service: credential check and access token handling

use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{TokenClaims, User},
    repository::Repository,
};

/// Name of the cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "my_access_token";

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Check credentials against the user registry and issue a token.
    ///
    /// Unknown email is `NotFound`; a wrong password is `Authentication`.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let user = self
            .repository
            .users
            .find_by_email(email)
            .await
            .ok_or_else(|| AppError::NotFound(format!("User with email {} not found", email)))?;

        if user.password != password {
            tracing::warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::Authentication("Incorrect email or password".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok(token)
    }

    /// Decode and check an access token
    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        TokenClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))
    }

    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = i64::try_from(self.config.jwt_expiration_hours)
            .ok()
            .and_then(|hours| hours.checked_mul(3600))
            .and_then(|secs| now.checked_add(secs))
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Token lifetime of {} hours is out of range",
                    self.config.jwt_expiration_hours
                ))
            })?;

        let claims = TokenClaims {
            sub: user.id.to_string(),
            user_id: user.id,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}
