use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email) && email.len() <= 254
}

/// Exactly `len` ASCII digits.
pub fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Indian mobile numbers as typed on the kiosk keypad: ten digits, no prefix.
pub fn validate_mobile(mobile: &str) -> bool {
    is_digits(mobile, 10)
}
