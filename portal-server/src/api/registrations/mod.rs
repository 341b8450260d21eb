//! Registration Request API Module

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Registration request router (admin only)
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/registrations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_pending))
        .route("/{id}/approve", post(handler::approve))
        .route("/{id}/reject", post(handler::reject))
        .layer(middleware::from_fn(require_admin))
}
