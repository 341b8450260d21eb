//! Ticket API Handlers
//!
//! Listing is role-scoped by the query layer, not by record-level checks:
//! a client simply never sees another client's tickets in their query.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    Ticket, TicketAssign, TicketCreate, TicketResolve, TicketSetStatus, TicketStatus, UNASSIGNED,
};
use crate::db::repository::{ClientRepository, TicketRepository};
use crate::utils::validation::{MAX_NAME_LEN, validate_payload, validate_required_text};
use crate::utils::{AppError, AppResult, time};

/// List tickets visible to the caller, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Ticket>>> {
    let repo = TicketRepository::new(state.get_db());
    let tickets = repo
        .find_scoped(&user.ticket_scope())
        .await
        .map_err(AppError::from)?;
    Ok(Json(tickets))
}

/// Create a ticket for the calling user.
///
/// The institution field carries a client record id; its name and city
/// are copied into the ticket so later client edits do not rewrite
/// history.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<TicketCreate>,
) -> AppResult<Json<Ticket>> {
    validate_payload(&payload)?;

    let clients = ClientRepository::new(state.get_db());
    let client = clients
        .find_by_id(&payload.institucion)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Client {} not found", payload.institucion)))?;

    let repo = TicketRepository::new(state.get_db());
    let ticket = repo
        .create(Ticket {
            id: None,
            name: user.display_name.clone(),
            email: user.email.clone(),
            institucion: client.name,
            ciudad: client.city,
            tipo_incidente: payload.tipo_incidente,
            description: payload.description,
            status: TicketStatus::Abierto,
            priority: payload.priority,
            assigned_to: UNASSIGNED.to_string(),
            created_at: time::now_millis(),
            rev: 0,
            resolved_at: None,
            resolved_by: None,
            resolution_details: None,
            resolution_parts: None,
            pending_activities: None,
            observations: None,
        })
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        ticket = %ticket.short_id(),
        email = %ticket.email,
        incident = %ticket.tipo_incidente.as_str(),
        "Ticket created"
    );

    Ok(Json(ticket))
}

/// Assign a technician and move the ticket to En Progreso (admin only).
/// The technician name is taken as-is; the dashboard picks it from the
/// technician list.
pub async fn assign(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TicketAssign>,
) -> AppResult<Json<Ticket>> {
    validate_required_text(&payload.technician, "technician", MAX_NAME_LEN)?;

    let repo = TicketRepository::new(state.get_db());
    let ticket = repo
        .assign(&id, payload.technician.trim(), payload.expected_rev)
        .await
        .map_err(AppError::from)?;

    tracing::info!(ticket = %ticket.short_id(), technician = %ticket.assigned_to, "Ticket assigned");

    Ok(Json(ticket))
}

/// Set the lifecycle status (En Espera / Cerrado). Resolution goes
/// through the resolve endpoint so the activity report is never skipped.
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TicketSetStatus>,
) -> AppResult<Json<Ticket>> {
    match payload.status {
        TicketStatus::EnEspera | TicketStatus::Cerrado => {}
        other => {
            return Err(AppError::validation(format!(
                "Status '{}' cannot be set directly",
                other.as_str()
            )));
        }
    }

    let repo = TicketRepository::new(state.get_db());
    let ticket = repo
        .set_status(&id, payload.status, payload.expected_rev)
        .await
        .map_err(AppError::from)?;

    tracing::info!(ticket = %ticket.short_id(), status = %ticket.status.as_str(), "Ticket status updated");

    Ok(Json(ticket))
}

/// Resolve a ticket with its activity report
pub async fn resolve(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    user: CurrentUser,
    Json(payload): Json<TicketResolve>,
) -> AppResult<Json<Ticket>> {
    validate_payload(&payload)?;

    let repo = TicketRepository::new(state.get_db());
    let ticket = repo
        .resolve(
            &id,
            &user.display_name,
            &payload.resolution_details,
            payload.resolution_parts,
            payload.pending_activities,
            payload.observations,
            payload.expected_rev,
        )
        .await
        .map_err(AppError::from)?;

    tracing::info!(ticket = %ticket.short_id(), resolved_by = %user.display_name, "Ticket resolved");

    Ok(Json(ticket))
}
