//! Contact Lead API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Contact router
/// - POST is public (skipped by the auth middleware)
/// - GET requires an authenticated admin (checked in the handler)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/contact", get(handler::list).post(handler::create))
}
