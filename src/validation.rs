use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Trimmed, lowercased email, or 400 if it does not look like one.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    if EMAIL_RE.is_match(&email) {
        Ok(email)
    } else {
        Err(AppError::BadRequest("A valid email is required".to_string()))
    }
}

/// Trimmed value of a required text field.
pub fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AppError::BadRequest(format!("{field} is required")))
    } else {
        Ok(trimmed)
    }
}
