//! Route handlers organized by resource

use serde::Serialize;

pub mod authors;
pub mod books;
pub mod borrows;
pub mod health;
pub mod root;
pub mod users;

/// Plain `{"message": ...}` body for root and delete confirmations
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub(crate) fn deleted() -> Self {
        Self { message: "Deleted" }
    }
}
