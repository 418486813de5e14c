//! Balance checks shared by the service and the storage write jobs.
//!
//! The service runs them against a snapshot to fail fast; the storage layer
//! runs them again inside the write transaction against fresh balances.

use rust_decimal::Decimal;

use super::ledger_errors::LedgerError;
use crate::accounts::CurrencyAccount;
use crate::constants::HOME_CURRENCY;

/// Fails unless `account` can cover `required`.
pub fn ensure_sufficient_balance(
    account: &CurrencyAccount,
    required: Decimal,
) -> Result<(), LedgerError> {
    if account.balance < required {
        return Err(LedgerError::insufficient_balance(&account.currency_code));
    }
    Ok(())
}

/// Fails for the home account and for accounts still holding money.
pub fn ensure_deletable(account: &CurrencyAccount) -> Result<(), LedgerError> {
    if account.is_home() {
        return Err(LedgerError::Forbidden(format!(
            "The {} account cannot be deleted.",
            HOME_CURRENCY
        )));
    }
    if !account.balance.is_zero() {
        return Err(LedgerError::NonZeroBalance(format!(
            "Cannot delete the {} account while its balance is {}.",
            account.currency_code, account.balance
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn account(currency_code: &str, balance: Decimal) -> CurrencyAccount {
        CurrencyAccount {
            id: format!("acc-{}", currency_code),
            user_id: "user-1".to_string(),
            currency_code: currency_code.to_string(),
            balance,
            is_active: true,
            account_number: "100-200-300".to_string(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_sufficient_balance() {
        let usd = account("USD", dec!(100.00));
        assert!(ensure_sufficient_balance(&usd, dec!(100.00)).is_ok());
        assert_eq!(
            ensure_sufficient_balance(&usd, dec!(100.01)),
            Err(LedgerError::InsufficientBalance(
                "Insufficient balance in USD account.".to_string()
            ))
        );
    }

    #[test]
    fn test_home_account_never_deletable() {
        let pln = account("PLN", Decimal::ZERO);
        assert!(matches!(
            ensure_deletable(&pln),
            Err(LedgerError::Forbidden(_))
        ));
    }

    #[test]
    fn test_non_zero_balance_blocks_delete() {
        assert!(matches!(
            ensure_deletable(&account("EUR", dec!(0.01))),
            Err(LedgerError::NonZeroBalance(_))
        ));
        assert!(ensure_deletable(&account("EUR", dec!(0.00))).is_ok());
    }
}
