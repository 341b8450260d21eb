//! Authentication middleware
//!
//! Validates the bearer token, re-resolves the caller's role from the
//! role map, and injects [`CurrentUser`] into request extensions.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::db::repository::RoleMapRepository;
use crate::security_log;
use crate::utils::AppError;

/// Authentication middleware — requires a logged-in identity with a role.
///
/// Skipped for:
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths
/// - `/api/auth/login`, `/api/auth/register`, `/api/health`
/// - `POST /api/contact` (public lead capture; listing leads stays gated)
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow CORS preflight OPTIONS requests
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes fall through to their own 404
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // Public API routes
    let is_public_api_route = path == "/api/auth/login"
        || path == "/api/auth/register"
        || path == "/api/health"
        || (path == "/api/contact" && req.method() == http::Method::POST);
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header).ok_or_else(|| {
            security_log!("WARN", "auth_malformed_header", uri = format!("{:?}", req.uri()));
            AppError::invalid_token()
        })?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    let claims = match jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            return match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            };
        }
    };

    // Re-resolve the role on every request; a missing entry and a failed
    // lookup both deny access.
    let role_map = RoleMapRepository::new(state.get_db())
        .get()
        .await
        .map_err(|e| {
            security_log!("WARN", "role_lookup_failed", error = format!("{}", e));
            AppError::forbidden("No role assigned")
        })?;

    let role = state
        .role_resolver()
        .resolve(&claims.email, &claims.sub, &role_map)
        .ok_or_else(|| {
            security_log!(
                "WARN",
                "no_role",
                uid = claims.sub.clone(),
                email = claims.email.clone()
            );
            AppError::forbidden("No role assigned")
        })?;

    let user = CurrentUser {
        uid: claims.sub,
        email: claims.email,
        display_name: claims.name,
        role,
    };
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Admin middleware — requires the admin role
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            uid = user.uid.clone(),
            role = user.role.to_string()
        );
        return Err(AppError::forbidden("Admin role required"));
    }

    Ok(next.run(req).await)
}

/// Staff middleware — requires admin or technician
pub async fn require_staff(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_staff() {
        security_log!(
            "WARN",
            "staff_required",
            uid = user.uid.clone(),
            role = user.role.to_string()
        );
        return Err(AppError::forbidden("Admin or technician role required"));
    }

    Ok(next.run(req).await)
}

/// Extractor for handlers: reads the [`CurrentUser`] the auth middleware
/// stored in request extensions.
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
