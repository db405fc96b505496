//! In-memory user registry

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::user::User;

/// Registered users in insertion order; never persisted
#[derive(Clone, Default)]
pub struct UsersRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl UsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated user. Duplicate ids and emails are accepted.
    pub async fn add(&self, user: User) {
        self.users.write().await.push(user);
    }

    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    /// First user registered with exactly this email
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.email == email)
            .cloned()
    }
}
