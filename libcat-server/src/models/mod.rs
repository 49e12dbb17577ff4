//! Request input models with validation at construction
//!
//! All user-supplied text is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod user;
pub mod author;
pub mod book;

pub use validation::{require, ValidationError};
pub use user::{Email, UserName};
pub use author::AuthorName;
pub use book::BookTitle;
