//! Data models for Bookshelf

pub mod book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook};
pub use user::{CreateUser, LoginRequest, TokenClaims, User};
