use crate::constants::HOME_CURRENCY;

/// Currency codes an account may be opened in, with their display names.
pub const SUPPORTED_CURRENCIES: &[(&str, &str)] = &[
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("JPY", "Japanese Yen"),
    ("GBP", "British Pound"),
    ("AUD", "Australian Dollar"),
    ("CAD", "Canadian Dollar"),
    ("CHF", "Swiss Franc"),
    ("SEK", "Swedish Krona"),
    (HOME_CURRENCY, "Polish Zloty"),
];

/// Attempts at drawing an unused account number before widening the code space.
pub const ACCOUNT_NUMBER_MAX_ATTEMPTS: usize = 16;

/// Returns true for three uppercase ASCII letters.
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Returns true if accounts can be opened in `code`.
pub fn is_supported_currency(code: &str) -> bool {
    is_currency_code(code) && SUPPORTED_CURRENCIES.iter().any(|(c, _)| *c == code)
}

/// Returns the display name of a supported currency.
pub fn currency_name(code: &str) -> Option<&'static str> {
    SUPPORTED_CURRENCIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Returns true if `code` is the home currency.
pub fn is_home_currency(code: &str) -> bool {
    code == HOME_CURRENCY
}
