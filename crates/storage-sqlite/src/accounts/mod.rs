//! SQLite storage implementation for currency accounts.

mod model;
mod repository;

pub use model::CurrencyAccountDB;
pub use repository::AccountRepository;
pub(crate) use repository::{find_account, find_account_by_id, store_balance};
