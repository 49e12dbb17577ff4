//! Welcome endpoint

use axum::{routing::get, Json, Router};

use super::MessageResponse;

/// GET /
async fn index() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Library Management System API",
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}
