//! Authentication API Module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Authentication router
/// - /api/auth/register, /api/auth/login: public (skipped by the auth middleware)
/// - /api/auth/me: any authenticated role
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/me", get(handler::me))
}
