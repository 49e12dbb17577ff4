//! Borrow endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{BookBorrow, Borrow, BorrowRepo, UserBorrow};
use crate::http::error::ApiError;
use crate::http::extractors::RecordId;
use crate::http::server::AppState;
use crate::models::require;

/// Create borrow request
#[derive(Deserialize)]
pub struct CreateBorrowRequest {
    pub user_id: Option<i64>,
    pub book_id: Option<i64>,
}

/// Borrow response
#[derive(Serialize)]
pub struct BorrowResponse {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
}

impl From<Borrow> for BorrowResponse {
    fn from(b: Borrow) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            book_id: b.book_id,
        }
    }
}

/// One of a user's borrows
#[derive(Serialize)]
pub struct UserBorrowResponse {
    pub book_id: i64,
    pub book_title: String,
    pub borrow_date: String,
}

impl From<UserBorrow> for UserBorrowResponse {
    fn from(b: UserBorrow) -> Self {
        Self {
            book_id: b.book_id,
            book_title: b.book_title,
            borrow_date: b.borrow_date.to_rfc3339(),
        }
    }
}

/// One of a book's borrows
#[derive(Serialize)]
pub struct BookBorrowResponse {
    pub user_id: i64,
    pub user_name: String,
    pub borrow_date: String,
}

impl From<BookBorrow> for BookBorrowResponse {
    fn from(b: BookBorrow) -> Self {
        Self {
            user_id: b.user_id,
            user_name: b.user_name,
            borrow_date: b.borrow_date.to_rfc3339(),
        }
    }
}

/// POST /borrows - record a user borrowing a book
async fn create_borrow(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateBorrowRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BorrowResponse>), ApiError> {
    let Json(req) = payload?;
    let user_id = require("user_id", req.user_id)?;
    let book_id = require("book_id", req.book_id)?;

    let borrow = BorrowRepo::new(&state.pool).create(user_id, book_id).await?;

    Ok((StatusCode::CREATED, Json(BorrowResponse::from(borrow))))
}

/// GET /borrows/user/{user_id} - a user's borrows with book titles
async fn list_user_borrows(
    State(state): State<Arc<AppState>>,
    RecordId(user_id): RecordId,
) -> Result<Json<Vec<UserBorrowResponse>>, ApiError> {
    let borrows = BorrowRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(borrows.into_iter().map(UserBorrowResponse::from).collect()))
}

/// GET /borrows/book/{book_id} - a book's borrows with borrower names
async fn list_book_borrows(
    State(state): State<Arc<AppState>>,
    RecordId(book_id): RecordId,
) -> Result<Json<Vec<BookBorrowResponse>>, ApiError> {
    let borrows = BorrowRepo::new(&state.pool).list_for_book(book_id).await?;
    Ok(Json(borrows.into_iter().map(BookBorrowResponse::from).collect()))
}

/// Borrow routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/borrows", post(create_borrow))
        .route("/borrows/user/{user_id}", get(list_user_borrows))
        .route("/borrows/book/{book_id}", get(list_book_borrows))
}
