//! Role Management API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Role management router (admin only)
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/roles", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/unassigned", get(handler::unassigned))
        .route(
            "/{uid}",
            axum::routing::put(handler::assign).delete(handler::remove),
        )
        .layer(middleware::from_fn(require_admin))
}
