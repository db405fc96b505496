//! User model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Registered user, held in memory only
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub age: i64,
    pub interests: Option<String>,
    /// Plain text, compared verbatim at login
    #[serde(skip_serializing)]
    pub password: String,
}

/// Create user request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    /// Caller-chosen identifier, not checked for uniqueness
    pub id: i64,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(range(min = 0, max = 120, message = "Age must be between 0 and 120"))]
    pub age: i64,
    #[validate(length(max = 500, message = "Interests must be at most 500 characters"))]
    pub interests: Option<String>,
    pub password: String,
}

impl From<CreateUser> for User {
    fn from(request: CreateUser) -> Self {
        User {
            id: request.id,
            email: request.email,
            age: request.age,
            interests: request.interests,
            password: request.password,
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// JWT claims carried by the access token cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id, as a string
    pub sub: String,
    pub user_id: i64,
    pub exp: i64,
    pub iat: i64,
}

impl TokenClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token, checking signature and expiry
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}
