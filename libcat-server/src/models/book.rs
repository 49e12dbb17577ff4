//! Book title validation

use super::validation::{check_text, ValidationError};

/// Maximum length for book titles
const MAX_BOOK_TITLE_LEN: usize = 200;

/// Validated book title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    /// Create a book title. Must be non-blank, at most 200 characters.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_text("title", s, MAX_BOOK_TITLE_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
