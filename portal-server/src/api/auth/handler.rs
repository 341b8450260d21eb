//! Authentication Handlers
//!
//! Self-registration, login and session introspection.

use std::time::Duration;

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    LoginRequest, LoginResponse, RegisterRequest, Registration, RegistrationStatus, UserInfo,
};
use crate::db::repository::{AccountRepository, RegistrationRepository, RoleMapRepository};
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult, time};

/// Fixed delay for credential checks to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Register handler
///
/// Creates the credential account and a pending registration request for
/// the admin to review. The account is unusable until a role is assigned.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<Registration>> {
    validate_payload(&req)?;

    let accounts = AccountRepository::new(state.get_db());
    let account = accounts
        .create(&req.email, &req.name, &req.password)
        .await
        .map_err(AppError::from)?;

    // Second write; a failure here leaves the account without a request
    // and the admin assigns the role from the user list instead.
    let registration = RegistrationRepository::new(state.get_db())
        .create(Registration {
            id: None,
            uid: account.uid(),
            name: req.name,
            email: req.email,
            company: req.company,
            ruc: req.ruc,
            phone: req.phone,
            status: RegistrationStatus::Pending,
            created_at: time::now_millis(),
        })
        .await
        .map_err(AppError::from)?;

    tracing::info!(uid = %account.uid(), email = %account.email, "New registration received");

    Ok(Json(registration))
}

/// Login handler
///
/// Verifies credentials, resolves the role and mints a bearer token.
/// An account with no resolvable role is denied outright; there is no
/// separate "pending" session state.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let accounts = AccountRepository::new(state.get_db());
    let account = accounts
        .find_by_email(&req.email)
        .await
        .map_err(AppError::from)?;

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(account) => {
            let password_valid = account
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            account
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - account not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let uid = account.uid();
    let role_map = RoleMapRepository::new(state.get_db())
        .get()
        .await
        .map_err(AppError::from)?;
    let role = state
        .role_resolver()
        .resolve(&account.email, &uid, &role_map)
        .ok_or_else(|| {
            tracing::warn!(uid = %uid, email = %account.email, "Login denied - no role assigned");
            AppError::forbidden("No role assigned")
        })?;

    let token = state
        .get_jwt_service()
        .generate_token(&uid, &account.email, &account.display_name)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(uid = %uid, email = %account.email, role = %role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            uid,
            email: account.email,
            display_name: account.display_name,
            role,
        },
    }))
}

/// Get current identity and resolved role
pub async fn me(user: CurrentUser) -> AppResult<Json<UserInfo>> {
    Ok(Json(UserInfo {
        uid: user.uid,
        email: user.email,
        display_name: user.display_name,
        role: user.role,
    }))
}
