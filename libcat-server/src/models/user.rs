//! User field validation
//!
//! Email uniqueness is a store constraint, not checked here.

use super::validation::{check_text, ValidationError};

/// Maximum length for user display names
const MAX_USER_NAME_LEN: usize = 100;

/// Maximum length for email addresses
const MAX_EMAIL_LEN: usize = 120;

/// Validated user display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Create a user name. Must be non-blank, at most 100 characters.
    ///
    /// # Example
    /// ```
    /// use libcat_server::models::UserName;
    ///
    /// assert!(UserName::new("Bob").is_ok());
    /// assert!(UserName::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_text("name", s, MAX_USER_NAME_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated email address
///
/// Only presence and length are enforced; the address format is stored as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_text("email", s, MAX_EMAIL_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
