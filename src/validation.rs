use crate::errors::AppError;
use crate::models::ContactRequest;
use once_cell::sync::Lazy;
use regex::Regex;

// Patterns use explicit ASCII digit classes: the regex crate's `\d` is
// Unicode-aware and would widen the accepted set beyond ASCII digits.
static TEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9\s]+$").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$").unwrap());
static ZIP_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{5}(?:[-\s][0-9]{4})?$").unwrap());
static PERSONAL_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}-[0-9]{4}$").unwrap());

/// Non-empty and made up of letters, digits, and whitespace only.
///
/// Used for name, address, city, and country fields. No trimming or
/// normalization is applied; a single stray punctuation mark rejects
/// the whole value.
pub fn validate_text(text: &str) -> bool {
    TEXT_RE.is_match(text)
}

/// `local@domain.tld` shape: letters/digits/`._-` local part, letters/
/// digits/`.-` domain, 2-6 letter TLD.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Five digits, optionally followed by a hyphen or space and four more
/// (US-style `NNNNN` / `NNNNN-NNNN` / `NNNNN NNNN`).
pub fn validate_zip_code(zip_code: &str) -> bool {
    ZIP_CODE_RE.is_match(zip_code)
}

/// Exactly six digits, a hyphen, then four digits (`NNNNNN-NNNN`).
pub fn validate_personal_number(personal_number: &str) -> bool {
    PERSONAL_NUMBER_RE.is_match(personal_number)
}

/// Record-level validation bound into the store's write path.
///
/// Checks every field of a prospective contact in schema declaration order
/// and fails with a field-specific message on the first violation. The
/// store calls this before any SQL executes, so a rejected write leaves no
/// partial state behind. The same patterns are restated as CHECK
/// constraints in `schema.sql`.
pub fn validate_contact(fields: &ContactRequest) -> Result<(), AppError> {
    if !validate_text(&fields.firstname) {
        return Err(AppError::Validation("Invalid firstname".to_string()));
    }
    if !validate_text(&fields.lastname) {
        return Err(AppError::Validation("Invalid lastname".to_string()));
    }
    if !validate_email(&fields.email) {
        return Err(AppError::Validation("Invalid email".to_string()));
    }
    if !validate_personal_number(&fields.personal_number) {
        return Err(AppError::Validation("Invalid personal number".to_string()));
    }
    if !validate_text(&fields.address) {
        return Err(AppError::Validation("Invalid address".to_string()));
    }
    if !validate_zip_code(&fields.zip_code) {
        return Err(AppError::Validation("Invalid zip code".to_string()));
    }
    if !validate_text(&fields.city) {
        return Err(AppError::Validation("Invalid city".to_string()));
    }
    if !validate_text(&fields.country) {
        return Err(AppError::Validation("Invalid country".to_string()));
    }
    Ok(())
}
