//! Input validation shared by the friend and note services.
//!
//! Checks are limited to presence and basic format:
//! - Names and note text must be non-empty
//! - Emails must look like `local@domain.tld`

use crate::error::{AppError, Result};

/// Reject an empty value for a required text field.
pub fn require_text(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Validate every address in an optional email list.
pub fn validate_emails(emails: Option<&[String]>) -> Result<()> {
    for email in emails.unwrap_or_default() {
        if !is_valid_email(email) {
            return Err(AppError::Validation(format!("Invalid email: {}", email)));
        }
    }
    Ok(())
}

/// Check an address has the shape `local@domain.tld`.
///
/// # Rules
/// - Exactly one `@`, with a non-empty local part
/// - No whitespace anywhere
/// - Domain has at least two non-empty dot-separated labels
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
