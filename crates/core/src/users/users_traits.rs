//! User repository, password hashing and service traits.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::users_model::{Credentials, NewUser, NewUserRecord, User, UserRecordUpdate, UserUpdate};
use crate::errors::Result;

/// Trait defining the contract for User repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn create(&self, new_user: NewUserRecord) -> Result<User>;

    async fn update(&self, user_update: UserRecordUpdate) -> Result<User>;

    /// Deletes a user together with everything it owns.
    ///
    /// Returns the number of deleted users.
    async fn delete(&self, user_id: &str) -> Result<usize>;

    /// Stamps a successful login.
    async fn record_login(&self, user_id: &str, at: NaiveDateTime) -> Result<User>;

    /// Retrieves a user by ID. Fails with `Error::NotFound` if missing.
    fn get_by_id(&self, user_id: &str) -> Result<User>;

    fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    fn list(&self) -> Result<Vec<User>>;
}

/// One-way password hashing.
pub trait PasswordHasherTrait: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;

    /// Returns false for a wrong password; errors only on a corrupt hash.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool>;
}

/// Trait defining the contract for User service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Validates and stores a new user and opens its home-currency account.
    async fn register(&self, new_user: NewUser) -> Result<User>;

    /// Checks credentials and records the login.
    async fn login(&self, credentials: Credentials) -> Result<User>;

    async fn update_user(&self, user_update: UserUpdate) -> Result<User>;

    async fn delete_user(&self, user_id: &str) -> Result<()>;

    fn get_user(&self, user_id: &str) -> Result<User>;

    fn list_users(&self) -> Result<Vec<User>>;
}
