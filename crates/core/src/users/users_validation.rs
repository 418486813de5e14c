//! Format rules for user records.
//!
//! Each field reports its first failing rule only; failures of different
//! fields are collected together. The two similarity rules are reported
//! independently of each other.

use regex::Regex;
use std::sync::LazyLock;

use crate::errors::{Error, Result, ValidationError};

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid username pattern"));
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]+(?: [A-Z][a-z]+)*$").expect("valid name pattern")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+48\d{9}$").expect("valid phone pattern"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Borrowed view of the validated fields of a user.
#[derive(Debug, Clone, Copy)]
pub struct UserFields<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone_number: &'a str,
    pub email: &'a str,
    /// `None` keeps the stored password; password rules are skipped.
    pub password: Option<&'a str>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_username(username: &str) -> Option<&'static str> {
    if is_blank(username) {
        Some("Username is required.")
    } else if !USERNAME_RE.is_match(username) {
        Some("Username cannot contain special characters.")
    } else {
        None
    }
}

fn check_name(value: &str, required: &'static str, format: &'static str) -> Option<&'static str> {
    if is_blank(value) {
        Some(required)
    } else if !NAME_RE.is_match(value) {
        Some(format)
    } else {
        None
    }
}

fn check_phone(phone_number: &str) -> Option<&'static str> {
    if is_blank(phone_number) {
        Some("Phone number is required.")
    } else if !PHONE_RE.is_match(phone_number) {
        Some("Phone number must be in the format +48XXXXXXXXX (9 digits after +48).")
    } else {
        None
    }
}

fn check_email(email: &str) -> Option<&'static str> {
    if is_blank(email) {
        Some("Email is required.")
    } else if !EMAIL_RE.is_match(email) {
        Some("Email must be valid (e.g., gasimoweltun@gmail.com).")
    } else {
        None
    }
}

fn check_password(password: &str) -> Option<&'static str> {
    let length = password.chars().count();
    if is_blank(password) {
        Some("Password is required.")
    } else if !(8..=16).contains(&length) {
        Some("Password must be between 8 and 16 characters.")
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Password must contain at least 1 uppercase letter.")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must contain at least 1 number.")
    } else if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        Some("Password must contain at least 1 special character (@, $, !, %, *, ?, &).")
    } else {
        None
    }
}

/// True if the password contains any underscore-separated part of the username.
fn resembles_username(password: &str, username: &str) -> bool {
    let password = password.to_lowercase();
    username
        .to_lowercase()
        .split('_')
        .filter(|token| !token.is_empty())
        .any(|token| password.contains(token))
}

/// True if the password contains the part of the email before the `@`.
fn resembles_email(password: &str, email: &str) -> bool {
    let local = email.split('@').next().unwrap_or_default().to_lowercase();
    !local.is_empty() && password.to_lowercase().contains(&local)
}

/// Returns every rule violation of `fields`, in field order.
pub fn rule_violations(fields: &UserFields<'_>) -> Vec<String> {
    let mut violations: Vec<&'static str> = Vec::new();

    violations.extend(check_username(fields.username));
    violations.extend(check_name(
        fields.first_name,
        "First name is required.",
        "First name must follow the format: Eltun.",
    ));
    violations.extend(check_name(
        fields.last_name,
        "Last name is required.",
        "Last name must follow the format: Gasimov.",
    ));
    violations.extend(check_phone(fields.phone_number));
    violations.extend(check_email(fields.email));

    if let Some(password) = fields.password {
        violations.extend(check_password(password));
        if !is_blank(password) {
            if !is_blank(fields.username) && resembles_username(password, fields.username) {
                violations.push("Username and password must not be similar.");
            }
            if !is_blank(fields.email) && resembles_email(password, fields.email) {
                violations.push("Email and password must not be similar.");
            }
        }
    }

    violations.into_iter().map(String::from).collect()
}

/// Fails with all rule violations of `fields`, if there are any.
pub fn validate_user(fields: &UserFields<'_>) -> Result<()> {
    let violations = rule_violations(fields);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(ValidationError::Rules(violations)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> UserFields<'static> {
        UserFields {
            username: "valid_user",
            first_name: "Eltun",
            last_name: "Gasimov",
            phone_number: "+48511383345",
            email: "validemail@gmail.com",
            password: Some("StrongPass1!"),
        }
    }

    fn violations_with(modify: impl FnOnce(&mut UserFields<'static>)) -> Vec<String> {
        let mut fields = valid_fields();
        modify(&mut fields);
        rule_violations(&fields)
    }

    #[test]
    fn test_valid_user() {
        assert!(validate_user(&valid_fields()).is_ok());
    }

    #[test]
    fn test_username_special_characters() {
        let violations = violations_with(|f| f.username = "invalid$user");
        assert_eq!(violations, vec!["Username cannot contain special characters."]);
    }

    #[test]
    fn test_username_required() {
        let violations = violations_with(|f| f.username = "  ");
        assert_eq!(violations, vec!["Username is required."]);
    }

    #[test]
    fn test_name_format() {
        let violations = violations_with(|f| {
            f.first_name = "eltun";
            f.last_name = "Van Der";
        });
        assert_eq!(violations, vec!["First name must follow the format: Eltun."]);

        let violations = violations_with(|f| f.last_name = "");
        assert_eq!(violations, vec!["Last name is required."]);
    }

    #[test]
    fn test_password_too_short() {
        let violations = violations_with(|f| f.password = Some("Short1!"));
        assert_eq!(
            violations,
            vec!["Password must be between 8 and 16 characters."]
        );
    }

    #[test]
    fn test_password_without_special_character() {
        let violations = violations_with(|f| f.password = Some("NoSpecial1"));
        assert_eq!(
            violations,
            vec!["Password must contain at least 1 special character (@, $, !, %, *, ?, &)."]
        );
    }

    #[test]
    fn test_password_rules_in_order() {
        assert_eq!(
            violations_with(|f| f.password = Some("lowercase1!")),
            vec!["Password must contain at least 1 uppercase letter."]
        );
        assert_eq!(
            violations_with(|f| f.password = Some("NoDigits!!")),
            vec!["Password must contain at least 1 number."]
        );
        assert_eq!(
            violations_with(|f| f.password = Some("")),
            vec!["Password is required."]
        );
    }

    #[test]
    fn test_invalid_phone_number_format() {
        let violations = violations_with(|f| f.phone_number = "+48012345");
        assert_eq!(
            violations,
            vec!["Phone number must be in the format +48XXXXXXXXX (9 digits after +48)."]
        );
    }

    #[test]
    fn test_invalid_email_format() {
        let violations = violations_with(|f| f.email = "invalid-email@domain");
        assert_eq!(
            violations,
            vec!["Email must be valid (e.g., gasimoweltun@gmail.com)."]
        );
    }

    #[test]
    fn test_email_and_username_similarity() {
        let violations = violations_with(|f| {
            f.email = "useremail@gmail.com";
            f.password = Some("Useremail1!");
        });
        assert!(violations.contains(&"Email and password must not be similar.".to_string()));
        assert!(violations.contains(&"Username and password must not be similar.".to_string()));
    }

    #[test]
    fn test_username_token_similarity_is_case_insensitive() {
        let violations = violations_with(|f| {
            f.username = "john_smith";
            f.password = Some("SMITHpass1!");
        });
        assert_eq!(violations, vec!["Username and password must not be similar."]);
    }

    #[test]
    fn test_empty_username_tokens_ignored() {
        let violations = violations_with(|f| f.username = "_alpha__");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_violations_accumulate_across_fields() {
        let violations = violations_with(|f| {
            f.username = "bad user";
            f.phone_number = "123";
            f.email = "";
        });
        assert_eq!(
            violations,
            vec![
                "Username cannot contain special characters.",
                "Phone number must be in the format +48XXXXXXXXX (9 digits after +48).",
                "Email is required.",
            ]
        );
    }

    #[test]
    fn test_password_rules_skipped_when_unchanged() {
        let violations = violations_with(|f| f.password = None);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_validate_user_returns_rules_error() {
        let mut fields = valid_fields();
        fields.email = "nope";
        match validate_user(&fields) {
            Err(Error::Validation(ValidationError::Rules(messages))) => {
                assert_eq!(messages.len(), 1)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
