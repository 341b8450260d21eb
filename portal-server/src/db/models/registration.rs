//! User Registration Request Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Registration request ID type
pub type RegistrationId = RecordId;

/// Review state of a self-registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Self-registration awaiting admin review. Never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RegistrationId>,
    /// Account uid the registration belongs to
    pub uid: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub ruc: String,
    pub phone: String,
    #[serde(default)]
    pub status: RegistrationStatus,
    pub created_at: i64,
}
