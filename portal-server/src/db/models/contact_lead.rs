//! Contact Lead Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Contact lead ID type
pub type ContactLeadId = RecordId;

/// Lead captured by the marketing-site contact form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactLead {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ContactLeadId>,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: i64,
}

/// Contact form payload (public endpoint)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactLeadCreate {
    #[validate(length(min = 2, max = 200, message = "el nombre debe tener al menos 2 caracteres"))]
    pub name: String,
    #[validate(email(message = "correo electrónico inválido"))]
    pub email: String,
    #[validate(length(min = 10, max = 500, message = "el mensaje debe tener entre 10 y 500 caracteres"))]
    pub message: String,
}
