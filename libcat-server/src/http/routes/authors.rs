//! Author endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::books::BookSummary;
use super::MessageResponse;
use crate::db::repos::{Author, AuthorRepo, AuthorWithBooks};
use crate::http::error::ApiError;
use crate::http::extractors::RecordId;
use crate::http::server::AppState;
use crate::models::{require, AuthorName};

/// Create author request
#[derive(Deserialize)]
pub struct CreateAuthorRequest {
    pub name: Option<String>,
}

/// Author response
#[derive(Serialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub name: String,
}

impl From<Author> for AuthorResponse {
    fn from(a: Author) -> Self {
        Self {
            id: a.id,
            name: a.name,
        }
    }
}

/// Author name with its books
#[derive(Serialize)]
pub struct AuthorBooksResponse {
    pub author: String,
    pub books: Vec<BookSummary>,
}

impl From<AuthorWithBooks> for AuthorBooksResponse {
    fn from(a: AuthorWithBooks) -> Self {
        Self {
            author: a.author.name,
            books: a.books.into_iter().map(BookSummary::from).collect(),
        }
    }
}

/// POST /authors - add an author
async fn create_author(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateAuthorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthorResponse>), ApiError> {
    let Json(req) = payload?;
    let name = AuthorName::new(&require("name", req.name)?)?;

    let author = AuthorRepo::new(&state.pool).create(name).await?;

    Ok((StatusCode::CREATED, Json(AuthorResponse::from(author))))
}

/// GET /authors - list all authors
async fn list_authors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AuthorResponse>>, ApiError> {
    let authors = AuthorRepo::new(&state.pool).list().await?;
    Ok(Json(authors.into_iter().map(AuthorResponse::from).collect()))
}

/// GET /authors/{id} - get a single author
async fn get_author(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<AuthorResponse>, ApiError> {
    let author = AuthorRepo::new(&state.pool).get(id).await?;
    Ok(Json(AuthorResponse::from(author)))
}

/// DELETE /authors/{id} - delete an author, its books, and their borrows
async fn delete_author(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<MessageResponse>, ApiError> {
    AuthorRepo::new(&state.pool).delete(id).await?;
    Ok(Json(MessageResponse::deleted()))
}

/// GET /authors/{id}/books - author name and books
async fn get_author_books(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<AuthorBooksResponse>, ApiError> {
    let found = AuthorRepo::new(&state.pool).get_with_books(id).await?;
    Ok(Json(AuthorBooksResponse::from(found)))
}

/// Author routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/authors", get(list_authors).post(create_author))
        .route("/authors/{id}", get(get_author).delete(delete_author))
        .route("/authors/{id}/books", get(get_author_books))
}
