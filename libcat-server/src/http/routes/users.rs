//! User endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::MessageResponse;
use crate::db::repos::{User, UserChanges, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::RecordId;
use crate::http::server::AppState;
use crate::models::{require, Email, UserName};

/// Create user request
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Update user request; absent fields are left unchanged
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// User response
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

/// POST /users - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(req) = payload?;
    let name = UserName::new(&require("name", req.name)?)?;
    let email = Email::new(&require("email", req.email)?)?;

    let user = UserRepo::new(&state.pool).create(name, email).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users - list all users
async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserRepo::new(&state.pool).list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/{id} - get a single user
async fn get_user(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /users/{id} - update name and/or email
async fn update_user(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(req) = payload?;
    let changes = UserChanges {
        name: req.name.as_deref().map(UserName::new).transpose()?,
        email: req.email.as_deref().map(Email::new).transpose()?,
    };

    let user = UserRepo::new(&state.pool).update(id, changes).await?;

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/{id} - delete a user and their borrows
async fn delete_user(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<MessageResponse>, ApiError> {
    UserRepo::new(&state.pool).delete(id).await?;
    Ok(Json(MessageResponse::deleted()))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
