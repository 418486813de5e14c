//! Users module - registration, authentication and validation rules.

mod users_model;
mod users_service;
mod users_traits;
mod users_validation;

pub use users_model::{Credentials, NewUser, NewUserRecord, User, UserRecordUpdate, UserUpdate};
pub use users_service::UserService;
pub use users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
pub use users_validation::{rule_violations, validate_user, UserFields};
