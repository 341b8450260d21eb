//! Report API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Report router — any authenticated role; scope comes from the query layer
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reports/summary", get(handler::summary))
        .route("/api/reports/export.csv", get(handler::export_csv))
}
