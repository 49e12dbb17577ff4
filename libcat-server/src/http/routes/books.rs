//! Book endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::MessageResponse;
use crate::db::repos::{Book, BookRepo, BookWithAuthor};
use crate::http::error::ApiError;
use crate::http::extractors::RecordId;
use crate::http::server::AppState;
use crate::models::{require, BookTitle};

/// Add book request
#[derive(Deserialize)]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub author_id: Option<i64>,
}

/// Book response
#[derive(Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author_id: i64,
}

impl From<Book> for BookResponse {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            title: b.title,
            author_id: b.author_id,
        }
    }
}

/// Book list entry with the author's name
#[derive(Serialize)]
pub struct BookListItem {
    pub id: i64,
    pub title: String,
    pub author: String,
}

impl From<BookWithAuthor> for BookListItem {
    fn from(b: BookWithAuthor) -> Self {
        Self {
            id: b.id,
            title: b.title,
            author: b.author,
        }
    }
}

/// Book id and title, for per-author listings
#[derive(Serialize)]
pub struct BookSummary {
    pub id: i64,
    pub title: String,
}

impl From<Book> for BookSummary {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            title: b.title,
        }
    }
}

/// POST /books - add a book to an existing author
async fn create_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let Json(req) = payload?;
    let title = BookTitle::new(&require("title", req.title)?)?;
    let author_id = require("author_id", req.author_id)?;

    let book = BookRepo::new(&state.pool).create(title, author_id).await?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// GET /books - list all books with author names
async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookListItem>>, ApiError> {
    let books = BookRepo::new(&state.pool).list().await?;
    Ok(Json(books.into_iter().map(BookListItem::from).collect()))
}

/// GET /books/{id} - get a single book
async fn get_book(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<BookResponse>, ApiError> {
    let book = BookRepo::new(&state.pool).get(id).await?;
    Ok(Json(BookResponse::from(book)))
}

/// GET /books/author/{author_id} - books of one author
async fn list_books_by_author(
    State(state): State<Arc<AppState>>,
    RecordId(author_id): RecordId,
) -> Result<Json<Vec<BookSummary>>, ApiError> {
    let books = BookRepo::new(&state.pool).list_for_author(author_id).await?;
    Ok(Json(books.into_iter().map(BookSummary::from).collect()))
}

/// DELETE /books/{id} - delete a book and its borrows
async fn delete_book(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<MessageResponse>, ApiError> {
    BookRepo::new(&state.pool).delete(id).await?;
    Ok(Json(MessageResponse::deleted()))
}

/// Book routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", get(get_book).delete(delete_book))
        .route("/books/author/{author_id}", get(list_books_by_author))
}
