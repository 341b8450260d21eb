//! Registration Request API Handlers
//!
//! The requests page is informational: approving here only marks the
//! request; the role itself is granted from the roles endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Registration, RegistrationStatus};
use crate::db::repository::RegistrationRepository;
use crate::utils::{AppError, AppResult};

/// List pending registration requests, newest first
pub async fn list_pending(State(state): State<ServerState>) -> AppResult<Json<Vec<Registration>>> {
    let repo = RegistrationRepository::new(state.get_db());
    let registrations = repo.find_pending().await.map_err(AppError::from)?;
    Ok(Json(registrations))
}

/// Mark a registration request approved
pub async fn approve(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Registration>> {
    let repo = RegistrationRepository::new(state.get_db());
    let registration = repo
        .set_status(&id, RegistrationStatus::Approved)
        .await
        .map_err(AppError::from)?;

    tracing::info!(uid = %registration.uid, "Registration approved");

    Ok(Json(registration))
}

/// Mark a registration request rejected. The record stays; the account
/// simply never receives a role.
pub async fn reject(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Registration>> {
    let repo = RegistrationRepository::new(state.get_db());
    let registration = repo
        .set_status(&id, RegistrationStatus::Rejected)
        .await
        .map_err(AppError::from)?;

    tracing::info!(uid = %registration.uid, "Registration rejected");

    Ok(Json(registration))
}
