// File: src/validators.rs
// Purpose: Field-level predicates used by the rule engine

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum password length accepted by the password format check
pub const MIN_PASSWORD_LEN: usize = 6;

// Anything without whitespace or '@', an '@', then a dotted domain
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

// Separators people type into phone numbers
static PHONE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s()]").expect("phone separator pattern compiles"));

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"));

static ZIP_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("zip code pattern compiles"));

/// Validate email format
///
/// # Examples
/// ```
/// use accessflow_forms::validate_email;
///
/// assert!(validate_email("a@b.com"));
/// assert!(!validate_email("a@b"));
/// ```
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Password must be at least [`MIN_PASSWORD_LEN`] characters
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// A value counts as provided when it has something other than whitespace
pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Exactly 10 digits once dashes, spaces and parentheses are removed
pub fn validate_phone(phone: &str) -> bool {
    let digits = PHONE_SEPARATORS.replace_all(phone, "");
    PHONE_REGEX.is_match(&digits)
}

/// US zip code: exactly 5 digits
pub fn validate_zip_code(zip: &str) -> bool {
    ZIP_CODE_REGEX.is_match(zip)
}
