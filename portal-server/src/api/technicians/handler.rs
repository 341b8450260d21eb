//! Technician API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Technician, TechnicianCreate, TechnicianUpdate};
use crate::db::repository::TechnicianRepository;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult};

/// List all technicians (the dashboard groups them by city)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Technician>>> {
    let repo = TechnicianRepository::new(state.get_db());
    let technicians = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(technicians))
}

/// Create a new technician
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TechnicianCreate>,
) -> AppResult<Json<Technician>> {
    validate_payload(&payload)?;

    let repo = TechnicianRepository::new(state.get_db());
    let technician = repo.create(payload).await.map_err(AppError::from)?;
    Ok(Json(technician))
}

/// Update a technician
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TechnicianUpdate>,
) -> AppResult<Json<Technician>> {
    let repo = TechnicianRepository::new(state.get_db());
    let technician = repo.update(&id, payload).await.map_err(AppError::from)?;
    Ok(Json(technician))
}

/// Hard delete a technician. Tickets already assigned keep the name.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = TechnicianRepository::new(state.get_db());
    let result = repo.delete(&id).await.map_err(AppError::from)?;
    Ok(Json(result))
}
