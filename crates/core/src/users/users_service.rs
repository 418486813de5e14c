use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;

use super::users_model::{Credentials, NewUser, NewUserRecord, User, UserRecordUpdate, UserUpdate};
use super::users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
use super::users_validation::{rule_violations, UserFields};
use crate::errors::{Error, Result, ValidationError};
use crate::ledger::LedgerServiceTrait;

const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Service for registering, authenticating and maintaining users
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    ledger_service: Arc<dyn LedgerServiceTrait>,
    password_hasher: Arc<dyn PasswordHasherTrait>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepositoryTrait>,
        ledger_service: Arc<dyn LedgerServiceTrait>,
        password_hasher: Arc<dyn PasswordHasherTrait>,
    ) -> Self {
        Self {
            repository,
            ledger_service,
            password_hasher,
        }
    }

    fn reject(violations: Vec<String>) -> Result<()> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(ValidationError::Rules(violations)))
        }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        let mut violations = rule_violations(&new_user.fields());
        if self.repository.find_by_username(&new_user.username)?.is_some() {
            violations.push(USERNAME_TAKEN.to_string());
        }
        Self::reject(violations)?;

        let password_hash = self.password_hasher.hash(&new_user.password)?;
        let user = self
            .repository
            .create(NewUserRecord {
                username: new_user.username,
                password_hash,
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                phone_number: new_user.phone_number,
                email: new_user.email,
            })
            .await?;

        if let Err(err) = self.ledger_service.open_home_account(&user.id).await {
            warn!(
                "Opening the home account of user {} failed, removing the user: {}",
                user.id, err
            );
            if let Err(cleanup_err) = self.repository.delete(&user.id).await {
                warn!("Failed to remove user {}: {}", user.id, cleanup_err);
            }
            return Err(err);
        }

        info!("Registered user {}", user.username);
        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<User> {
        if credentials.username.trim().is_empty() || credentials.password.is_empty() {
            return Err(Error::Validation(ValidationError::Rules(vec![
                "Username and password are required.".to_string(),
            ])));
        }

        let user = self
            .repository
            .find_by_username(&credentials.username)?
            .ok_or_else(|| Error::NotFound("User does not exist.".to_string()))?;

        if !self
            .password_hasher
            .verify(&credentials.password, &user.password_hash)?
        {
            debug!("Rejected login for {}", user.username);
            return Err(Error::InvalidCredentials);
        }

        self.repository
            .record_login(&user.id, Utc::now().naive_utc())
            .await
    }

    async fn update_user(&self, user_update: UserUpdate) -> Result<User> {
        let user_id = user_update.id.clone().ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(
                "User ID is required for updates".to_string(),
            ))
        })?;
        let existing = self.repository.get_by_id(&user_id)?;

        let first_name = user_update.first_name.unwrap_or(existing.first_name);
        let last_name = user_update.last_name.unwrap_or(existing.last_name);
        let phone_number = user_update.phone_number.unwrap_or(existing.phone_number);
        let email = user_update.email.unwrap_or(existing.email);

        Self::reject(rule_violations(&UserFields {
            username: &existing.username,
            first_name: &first_name,
            last_name: &last_name,
            phone_number: &phone_number,
            email: &email,
            password: user_update.password.as_deref(),
        }))?;

        let password_hash = user_update
            .password
            .as_deref()
            .map(|password| self.password_hasher.hash(password))
            .transpose()?;

        self.repository
            .update(UserRecordUpdate {
                id: user_id,
                first_name,
                last_name,
                phone_number,
                email,
                password_hash,
            })
            .await
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        if self.repository.delete(user_id).await? == 0 {
            return Err(Error::NotFound("User not found".to_string()));
        }
        info!("Deleted user {}", user_id);
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.repository.list()
    }
}
