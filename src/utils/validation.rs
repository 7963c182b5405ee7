//! Field validation helpers used by request DTOs.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::ValidationError;

/// `#RRGGBB` hex colors.
pub static COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

/// Usernames: letters, digits, dot, underscore and hyphen.
pub static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap());

const CUIT_WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Strips dashes from a CUIT/CUIL, returning the 11 digits when well formed.
pub fn normalize_cuit(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return None;
    }

    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    (digits.len() == 11).then_some(digits)
}

/// True for an 11-digit CUIT/CUIL (dashes allowed) with a valid check digit.
pub fn is_valid_cuit(value: &str) -> bool {
    let Some(digits) = normalize_cuit(value) else {
        return false;
    };

    let nums: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    let sum: u32 = nums
        .iter()
        .zip(CUIT_WEIGHTS.iter())
        .map(|(d, w)| d * w)
        .sum();

    let expected = match 11 - (sum % 11) {
        11 => 0,
        10 => return false,
        n => n,
    };

    nums[10] == expected
}

/// `validator` custom function for CUIT/CUIL fields.
pub fn validate_cuit(value: &str) -> Result<(), ValidationError> {
    if is_valid_cuit(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("cuit");
        err.message = Some(Cow::from("Invalid CUIT/CUIL (11 digits with a valid check digit)"));
        Err(err)
    }
}
