//! Client API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Client, ClientCreate, ClientUpdate};
use crate::db::repository::ClientRepository;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult};

/// List all clients. Open to every role: the new-ticket form offers the
/// institution list to clients as well.
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Client>>> {
    let repo = ClientRepository::new(state.get_db());
    let clients = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(clients))
}

/// Create a new client
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClientCreate>,
) -> AppResult<Json<Client>> {
    validate_payload(&payload)?;

    let repo = ClientRepository::new(state.get_db());
    let client = repo.create(payload).await.map_err(AppError::from)?;
    Ok(Json(client))
}

/// Update a client
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ClientUpdate>,
) -> AppResult<Json<Client>> {
    let repo = ClientRepository::new(state.get_db());
    let client = repo.update(&id, payload).await.map_err(AppError::from)?;
    Ok(Json(client))
}

/// Hard delete a client
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ClientRepository::new(state.get_db());
    let result = repo.delete(&id).await.map_err(AppError::from)?;
    Ok(Json(result))
}
