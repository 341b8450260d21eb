//! Input validation helpers
//!
//! Request DTOs carry `validator` derives; these helpers cover the
//! checks that do not fit a derive. The document store enforces no
//! lengths itself.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity and person names: technician, client, institution
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone, RUC, specialty, city
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Run `validator` derive checks and map the first failure to an AppError
pub fn validate_payload<T: validator::Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|e| {
        let detail = e
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let msg = errs
                    .first()
                    .and_then(|err| err.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                format!("{field}: {msg}")
            })
            .unwrap_or_else(|| "invalid payload".to_string());
        AppError::validation(detail)
    })
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}
