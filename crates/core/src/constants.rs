use rust_decimal::Decimal;

/// Currency every user holds an account in from registration onwards.
/// Rates are quoted against it.
pub const HOME_CURRENCY: &str = "PLN";

/// Fractional digits carried by every stored amount
pub const MONEY_SCALE: u32 = 2;

/// Largest amount or balance an account can hold (ten digits, two of them
/// fractional).
pub const MAX_MONEY: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);
