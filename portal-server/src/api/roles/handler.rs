//! Role Management API Handlers
//!
//! The role map is the whole authorization model: one record, uid → role.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{AccountInfo, RoleEntry};
use crate::db::repository::{AccountRepository, RegistrationRepository, RoleMapRepository};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct RoleAssigned {
    pub uid: String,
    pub role: crate::db::models::Role,
}

/// List all role-map entries
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<RoleEntry>>> {
    let repo = RoleMapRepository::new(state.get_db());
    let entries = repo.entries().await.map_err(AppError::from)?;
    Ok(Json(entries))
}

/// Assign a role to an account.
///
/// Merges the entry into the role map, then marks the matching
/// registration request approved. The second write is best-effort: if it
/// fails the role stands and the request stays pending, with no
/// compensating action.
pub async fn assign(
    State(state): State<ServerState>,
    Path(uid): Path<String>,
    Json(payload): Json<crate::db::models::RoleAssign>,
) -> AppResult<Json<RoleAssigned>> {
    let accounts = AccountRepository::new(state.get_db());
    if accounts
        .find_by_uid(&uid)
        .await
        .map_err(AppError::from)?
        .is_none()
    {
        return Err(AppError::not_found(format!("Account {} not found", uid)));
    }

    let roles = RoleMapRepository::new(state.get_db());
    roles.assign(&uid, payload.role).await.map_err(AppError::from)?;

    if let Err(e) = RegistrationRepository::new(state.get_db())
        .approve_by_uid(&uid)
        .await
    {
        tracing::error!(uid = %uid, error = %e, "Role assigned but registration not marked approved");
    }

    tracing::info!(uid = %uid, role = %payload.role, "Role assigned");

    Ok(Json(RoleAssigned {
        uid,
        role: payload.role,
    }))
}

/// Remove an account's role. The account stays; it just loses access.
pub async fn remove(
    State(state): State<ServerState>,
    Path(uid): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = RoleMapRepository::new(state.get_db());
    repo.remove(&uid).await.map_err(AppError::from)?;

    tracing::info!(uid = %uid, "Role removed");

    Ok(Json(true))
}

/// List accounts that have no entry in the role map — the pool the admin
/// assigns roles from.
pub async fn unassigned(State(state): State<ServerState>) -> AppResult<Json<Vec<AccountInfo>>> {
    let role_map = RoleMapRepository::new(state.get_db())
        .get()
        .await
        .map_err(AppError::from)?;

    let accounts = AccountRepository::new(state.get_db())
        .find_all()
        .await
        .map_err(AppError::from)?;

    let without_role = accounts
        .into_iter()
        .filter(|account| !role_map.roles.contains_key(&account.uid()))
        .map(AccountInfo::from)
        .collect();

    Ok(Json(without_role))
}
