//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Required field absent from the payload
    Missing { field: &'static str },

    /// Field is empty (or whitespace only) when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't have the required shape (e.g., a path id)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Unwrap a required payload field.
pub fn require<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}

/// Check a required text field: non-blank and within `max` characters.
pub(crate) fn check_text(field: &'static str, s: &str, max: usize) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if s.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 200,
        };
        assert_eq!(
            err.to_string(),
            "title exceeds maximum length of 200 characters"
        );
        assert_eq!(
            ValidationError::Missing { field: "email" }.to_string(),
            "email is required"
        );
    }

    #[test]
    fn require_passes_present_values() {
        assert_eq!(require("author_id", Some(3)).unwrap(), 3);
        let err = require::<i64>("author_id", None).unwrap_err();
        assert!(matches!(err, ValidationError::Missing { field: "author_id" }));
    }

    #[test]
    fn check_text_counts_chars_not_bytes() {
        // 4 chars, 8 bytes
        assert!(check_text("name", "éééé", 4).is_ok());
        assert!(check_text("name", "ééééé", 4).is_err());
    }

    #[test]
    fn check_text_rejects_whitespace() {
        let err = check_text("name", "   ", 10).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "name" }));
    }
}
