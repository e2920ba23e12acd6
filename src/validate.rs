//! Shared form validators
//!
//! One copy of the email/password/required-field checks, consumed by every
//! command and access module instead of per-form literals. All checks run
//! locally, before any network call.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ApiError, ApiResult};

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid");
}

pub const REQUIRED_CREDENTIALS: &str = "Email and password are required.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const WEAK_PASSWORD: &str =
    "Password must be at least 8 characters and include upper and lower case letters, a digit and a symbol.";

/// Syntactic email check. "a@b" is rejected: the domain needs a dot.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Password complexity: minimum 8 characters with upper, lower, digit and symbol.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

pub fn validate_email(email: &str) -> ApiResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ApiError::validation(INVALID_EMAIL))
    }
}

pub fn validate_password(password: &str) -> ApiResult<()> {
    if is_strong_password(password) {
        Ok(())
    } else {
        Err(ApiError::validation(WEAK_PASSWORD))
    }
}

/// Signin form check: required fields first, then email format.
pub fn validate_signin(email: &str, password: &str) -> ApiResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::validation(REQUIRED_CREDENTIALS));
    }
    validate_email(email)
}

/// Required free-text field (approval notes, rejection reasons, titles).
pub fn require_non_empty(value: &str, what: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        Err(ApiError::validation(format!("{} must not be empty", what)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_normal_emails() {
        assert!(is_valid_email("hacker@example.com"));
        assert!(is_valid_email("first.last+tag@sub.domain.io"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn password_complexity_vectors() {
        assert!(is_strong_password("Str0ng!Pass"));
        assert!(!is_strong_password("weak"));
        assert!(!is_strong_password("alllowercase1!"));
        assert!(!is_strong_password("NoSymbol123"));
    }

    #[test]
    fn signin_requires_both_fields() {
        let err = validate_signin("hacker@example.com", "").unwrap_err();
        assert_eq!(err.to_string(), REQUIRED_CREDENTIALS);
        assert!(err.is_local());

        let err = validate_signin("", "Str0ng!Pass").unwrap_err();
        assert_eq!(err.to_string(), REQUIRED_CREDENTIALS);
    }

    #[test]
    fn signin_rejects_malformed_email() {
        let err = validate_signin("a@b", "Str0ng!Pass").unwrap_err();
        assert_eq!(err.to_string(), INVALID_EMAIL);
        assert!(err.is_local());
    }

    #[test]
    fn signin_accepts_valid_credentials() {
        assert!(validate_signin("hacker@example.com", "Str0ng!Pass").is_ok());
    }

    #[test]
    fn non_empty_guard() {
        assert!(require_non_empty("looks good", "Approval note").is_ok());
        let err = require_non_empty("   ", "Rejection reason").unwrap_err();
        assert_eq!(err.to_string(), "Rejection reason must not be empty");
    }
}
