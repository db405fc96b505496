//! User registration service

use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{CreateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and register a user
    pub async fn create_user(&self, user: CreateUser) -> AppResult<()> {
        user.validate()?;

        let user = User::from(user);
        tracing::info!(user_id = user.id, "User registered");
        self.repository.users.add(user).await;
        Ok(())
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.repository.users.list().await
    }
}
