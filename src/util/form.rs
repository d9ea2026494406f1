//! Field validators shared by the login, register and session forms.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use chrono::NaiveDate;

use crate::net::types::DATE_FORMAT;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: &'static str },
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must be a date formatted YYYY-MM-DD")]
    InvalidDate { field: &'static str },
}

impl FormError {
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::InvalidEmail { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::InvalidDate { field } => *field,
        }
    }
}

/// Reject blank input. Returns the value untouched.
pub fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Required { field });
    }
    Ok(value)
}

/// Character-count bounds, inclusive.
pub fn length(field: &'static str, value: &str, min: usize, max: Option<usize>) -> Result<(), FormError> {
    let count = value.chars().count();
    if count < min {
        return Err(FormError::TooShort { field, min });
    }
    if let Some(max) = max {
        if count > max {
            return Err(FormError::TooLong { field, max });
        }
    }
    Ok(())
}

/// Required, trimmed email address.
pub fn email(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = required(field, value)?.trim();
    if !is_email(value) {
        return Err(FormError::InvalidEmail { field });
    }
    Ok(value.to_owned())
}

/// Required `YYYY-MM-DD` date. Timestamps are rejected.
pub fn date(field: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    let value = required(field, value)?.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| FormError::InvalidDate { field })
}

/// Loose address check: one `@`, a non-empty local part, and a domain made
/// of non-empty dot-separated labels. Single-label domains are accepted.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    !domain.is_empty()
        && domain
            .split('.')
            .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
}
