/// Health check endpoint
///
/// GET /ping -> {"message":"pong"}. Independent of configuration.

use crate::api::MessageResponse;
use axum::{response::Json, routing::get, Router};

pub fn create_health_routes() -> Router {
    Router::new().route("/ping", get(ping))
}

async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse::new("pong"))
}
