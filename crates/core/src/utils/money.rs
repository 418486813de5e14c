//! Fixed-point money helpers.
//!
//! Every stored amount carries exactly [`MONEY_SCALE`] fractional digits.
//! Rate-adjusted quantities are rounded in the ledger's favour: debits round
//! away from zero, credits toward zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{MAX_MONEY, MONEY_SCALE};
use crate::ledger::LedgerError;

/// Checks a caller-supplied amount: strictly positive, at most two
/// fractional digits and no larger than [`MAX_MONEY`]. Returns it rescaled
/// to the money scale.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(
            "Amount must be greater than zero.".to_string(),
        ));
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(LedgerError::InvalidAmount(format!(
            "Amount must have at most {} decimal places.",
            MONEY_SCALE
        )));
    }
    if amount > MAX_MONEY {
        return Err(LedgerError::InvalidAmount(format!(
            "Amount must not exceed {}.",
            MAX_MONEY
        )));
    }
    Ok(to_money(amount))
}

/// Balance after crediting `amount`, refused when it would pass [`MAX_MONEY`].
pub fn credit_balance(
    balance: Decimal,
    amount: Decimal,
    currency_code: &str,
) -> Result<Decimal, LedgerError> {
    balance
        .checked_add(amount)
        .filter(|total| *total <= MAX_MONEY)
        .map(to_money)
        .ok_or_else(|| {
            LedgerError::InvalidAmount(format!(
                "Balance of {} account would exceed {}.",
                currency_code, MAX_MONEY
            ))
        })
}

/// Multiplies an amount by a rate, refusing results outside the decimal range.
pub fn checked_price(amount: Decimal, rate: Decimal) -> Result<Decimal, LedgerError> {
    amount.checked_mul(rate).ok_or_else(|| {
        LedgerError::InvalidAmount("Converted amount is out of range.".to_string())
    })
}

/// Rounds a quantity leaving an account.
pub fn round_debit(value: Decimal) -> Decimal {
    to_money(value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::AwayFromZero))
}

/// Rounds a quantity entering an account.
pub fn round_credit(value: Decimal) -> Decimal {
    to_money(value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToZero))
}

/// Rescales an already-rounded value so it renders with two digits.
pub fn to_money(value: Decimal) -> Decimal {
    let mut value = value.round_dp(MONEY_SCALE);
    value.rescale(MONEY_SCALE);
    value
}
