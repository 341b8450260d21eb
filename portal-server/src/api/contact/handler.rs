//! Contact Lead API Handlers

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{ContactLead, ContactLeadCreate};
use crate::db::repository::ContactLeadRepository;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult};

/// Capture a lead from the public marketing-site contact form
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ContactLeadCreate>,
) -> AppResult<Json<ContactLead>> {
    validate_payload(&payload)?;

    let repo = ContactLeadRepository::new(state.get_db());
    let lead = repo.create(payload).await.map_err(AppError::from)?;

    tracing::info!(email = %lead.email, "Contact lead received");

    Ok(Json(lead))
}

/// List captured leads for admin follow-up.
///
/// Same path as the public POST, so the admin check lives here instead of
/// a route layer.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ContactLead>>> {
    if !user.is_admin() {
        return Err(AppError::forbidden("Admin role required"));
    }

    let repo = ContactLeadRepository::new(state.get_db());
    let leads = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(leads))
}
