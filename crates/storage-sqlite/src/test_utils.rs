//! Shared fixtures for repository tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rust_decimal::Decimal;
use tempfile::{tempdir, TempDir};

use kantor_core::accounts::{AccountRepositoryTrait, CurrencyAccount, NewCurrencyAccount};
use kantor_core::ledger::{DepositRequest, LedgerRepositoryTrait};
use kantor_core::users::{NewUserRecord, User, UserRepositoryTrait};

use crate::accounts::AccountRepository;
use crate::db::{create_pool, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::ledger::LedgerRepository;
use crate::users::UserRepository;

/// Repositories over a fresh migrated database. The temp dir must outlive them.
pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub users: UserRepository,
    pub accounts: AccountRepository,
    pub ledger: LedgerRepository,
    pub writer: WriteHandle,
    _temp_dir: TempDir,
}

pub async fn setup() -> TestDb {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db_path_str = db_path.to_string_lossy().to_string();

    let pool = create_pool(&db_path_str).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    TestDb {
        users: UserRepository::new(Arc::clone(&pool), writer.clone()),
        accounts: AccountRepository::new(Arc::clone(&pool), writer.clone()),
        ledger: LedgerRepository::new(Arc::clone(&pool), writer.clone()),
        writer,
        pool,
        _temp_dir: temp_dir,
    }
}

/// A phone number derived from the username, distinct per name in practice.
pub fn phone_for(name: &str) -> String {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    format!("+48{:09}", hasher.finish() % 1_000_000_000)
}

pub fn user_record(name: &str) -> NewUserRecord {
    NewUserRecord {
        username: name.to_string(),
        password_hash: format!("hash-{}", name),
        first_name: "Eltun".to_string(),
        last_name: "Mammadov".to_string(),
        phone_number: phone_for(name),
        email: format!("{}@example.com", name),
    }
}

impl TestDb {
    pub async fn create_user(&self, name: &str) -> User {
        self.users
            .create(user_record(name))
            .await
            .expect("Failed to create user")
    }

    pub async fn open_account(&self, user_id: &str, currency: &str) -> CurrencyAccount {
        self.accounts
            .create(NewCurrencyAccount::new(user_id, currency))
            .await
            .expect("Failed to open account")
    }

    pub async fn fund(&self, user_id: &str, currency: &str, amount: Decimal) {
        self.ledger
            .apply_deposit(DepositRequest {
                user_id: user_id.to_string(),
                currency_code: currency.to_string(),
                amount,
            })
            .await
            .expect("Failed to fund account");
    }

    pub fn balance(&self, user_id: &str, currency: &str) -> Decimal {
        self.accounts
            .find_by_user_and_currency(user_id, currency)
            .expect("Failed to load account")
            .map(|account| account.balance)
            .expect("Account missing")
    }
}
