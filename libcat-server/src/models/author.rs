//! Author name validation

use super::validation::{check_text, ValidationError};

/// Maximum length for author names
const MAX_AUTHOR_NAME_LEN: usize = 100;

/// Validated author name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_text("name", s, MAX_AUTHOR_NAME_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_names_at_limit() {
        assert!(AuthorName::new("Tolkien").is_ok());
        assert!(AuthorName::new(&"t".repeat(100)).is_ok());
        assert!(AuthorName::new(&"t".repeat(101)).is_err());
    }
}
