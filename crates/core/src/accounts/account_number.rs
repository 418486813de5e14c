//! Account number allocation.
//!
//! Numbers are drawn at random and checked against the ones already issued.
//! After [`ACCOUNT_NUMBER_MAX_ATTEMPTS`] collisions in the `XXX-XXX-XXX`
//! space the generator switches to `XXXX-XXXX-XXXX`.

use log::warn;
use rand::Rng;

use super::accounts_constants::ACCOUNT_NUMBER_MAX_ATTEMPTS;
use crate::{Error, Result};

fn short_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}-{}-{}",
        rng.gen_range(100..1000),
        rng.gen_range(100..1000),
        rng.gen_range(100..1000)
    )
}

fn long_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}-{}-{}",
        rng.gen_range(1000..10000),
        rng.gen_range(1000..10000),
        rng.gen_range(1000..10000)
    )
}

/// Draws an account number for which `is_taken` returns false.
///
/// `is_taken` is usually a lookup inside the same write transaction that
/// inserts the account, so a returned number is free at insert time.
pub fn generate_account_number<R, F>(rng: &mut R, mut is_taken: F) -> Result<String>
where
    R: Rng + ?Sized,
    F: FnMut(&str) -> Result<bool>,
{
    for _ in 0..ACCOUNT_NUMBER_MAX_ATTEMPTS {
        let candidate = short_number(rng);
        if !is_taken(&candidate)? {
            return Ok(candidate);
        }
    }

    warn!(
        "No free account number after {} attempts, using the long format",
        ACCOUNT_NUMBER_MAX_ATTEMPTS
    );
    for _ in 0..ACCOUNT_NUMBER_MAX_ATTEMPTS {
        let candidate = long_number(rng);
        if !is_taken(&candidate)? {
            return Ok(candidate);
        }
    }

    Err(Error::Unexpected(
        "Could not allocate a unique account number".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DatabaseError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;
    use std::collections::HashSet;

    #[test]
    fn test_short_format() {
        let mut rng = StdRng::seed_from_u64(7);
        let pattern = Regex::new(r"^[1-9]\d{2}-[1-9]\d{2}-[1-9]\d{2}$").unwrap();

        for _ in 0..100 {
            let number = generate_account_number(&mut rng, |_| Ok(false)).unwrap();
            assert!(pattern.is_match(&number), "unexpected number {}", number);
        }
    }

    #[test]
    fn test_skips_taken_numbers() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut issued = HashSet::new();
        for _ in 0..500 {
            let number =
                generate_account_number(&mut rng, |n| Ok(issued.contains(n))).unwrap();
            assert!(issued.insert(number));
        }
    }

    #[test]
    fn test_falls_back_to_long_format() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut calls = 0;
        let number = generate_account_number(&mut rng, |_| {
            calls += 1;
            Ok(calls <= ACCOUNT_NUMBER_MAX_ATTEMPTS)
        })
        .unwrap();

        let pattern = Regex::new(r"^\d{4}-\d{4}-\d{4}$").unwrap();
        assert!(pattern.is_match(&number));
    }

    #[test]
    fn test_exhausted_code_space() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = generate_account_number(&mut rng, |_| Ok(true));
        assert!(matches!(result, Err(Error::Unexpected(_))));
    }

    #[test]
    fn test_lookup_error_propagates() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = generate_account_number(&mut rng, |_| {
            Err(Error::Database(DatabaseError::QueryFailed("lookup failed".to_string())))
        });
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::QueryFailed(_)))
        ));
    }
}
