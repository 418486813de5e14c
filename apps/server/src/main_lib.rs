use std::sync::Arc;

use crate::{auth::Argon2PasswordHasher, config::Config};
use kantor_core::{
    accounts::{AccountService, AccountServiceTrait},
    ledger::{LedgerService, LedgerServiceTrait},
    users::{UserService, UserServiceTrait},
};
use kantor_rates::{CachingRateProvider, NbpRateProvider, RateProvider};
use kantor_storage_sqlite::{
    accounts::AccountRepository, db, ledger::LedgerRepository, users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("KANTOR_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let account_repo = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let ledger_repo = Arc::new(LedgerRepository::new(pool.clone(), writer));

    let nbp = NbpRateProvider::new(config.rates_base_url.clone(), config.rates_timeout);
    let rate_provider: Arc<dyn RateProvider> =
        Arc::new(CachingRateProvider::new(nbp, config.rates_cache_ttl));
    tracing::info!(
        "Exchange rates from {} (cache ttl {:?})",
        config.rates_base_url,
        config.rates_cache_ttl
    );

    let ledger_service = Arc::new(LedgerService::new(
        ledger_repo,
        account_repo.clone(),
        rate_provider,
    ));
    let account_service = Arc::new(AccountService::new(account_repo, user_repo.clone()));
    let user_service = Arc::new(UserService::new(
        user_repo,
        ledger_service.clone(),
        Arc::new(Argon2PasswordHasher::default()),
    ));

    Ok(Arc::new(AppState {
        user_service,
        account_service,
        ledger_service,
    }))
}
