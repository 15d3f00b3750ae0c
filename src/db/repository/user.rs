//! User repository trait: credential storage for dashboard accounts.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::db::models::User;

/// Repository trait for the user-credential table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user with an already-hashed password.
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user with its assigned id
    /// * `Err(RepositoryError::ValidationError)` - If the username is taken
    async fn create_user(&self, username: &str, password_hash: &str) -> RepositoryResult<User>;

    /// Look up a user by username.
    async fn find_user(&self, username: &str) -> RepositoryResult<Option<User>>;
}
