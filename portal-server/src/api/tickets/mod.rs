//! Ticket API Module

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::{require_admin, require_staff};
use crate::core::ServerState;

/// Ticket router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tickets", routes())
}

fn routes() -> Router<ServerState> {
    // Any authenticated role: role scoping happens in the query layer
    let user_routes = Router::new()
        .route("/", get(handler::list).post(handler::create));

    // Admin only: assignment
    let admin_routes = Router::new()
        .route("/{id}/assign", post(handler::assign))
        .layer(middleware::from_fn(require_admin));

    // Admin or technician: status changes and resolution
    let staff_routes = Router::new()
        .route("/{id}/status", post(handler::set_status))
        .route("/{id}/resolve", post(handler::resolve))
        .layer(middleware::from_fn(require_staff));

    user_routes.merge(admin_routes).merge(staff_routes)
}
