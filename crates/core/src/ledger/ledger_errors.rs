use thiserror::Error;

/// Business-rule failures of ledger operations.
///
/// The payload is the client-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidAmount(String),

    #[error("{0}")]
    InsufficientBalance(String),

    #[error("{0}")]
    DuplicateAccount(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NonZeroBalance(String),
}

impl LedgerError {
    pub fn account_not_found(currency_code: &str) -> Self {
        LedgerError::NotFound(format!("{} account not found.", currency_code))
    }

    pub fn insufficient_balance(currency_code: &str) -> Self {
        LedgerError::InsufficientBalance(format!(
            "Insufficient balance in {} account.",
            currency_code
        ))
    }

    pub fn duplicate_account(currency_code: &str) -> Self {
        LedgerError::DuplicateAccount(format!(
            "Account with this currency ({}) already exists for this user.",
            currency_code
        ))
    }
}
