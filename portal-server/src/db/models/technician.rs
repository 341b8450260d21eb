//! Technician Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Technician ID type
pub type TechnicianId = RecordId;

/// Field technician. Tickets reference technicians by display name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technician {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<TechnicianId>,
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub city: String,
}

/// Create technician payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TechnicianCreate {
    #[validate(length(min = 2, max = 200, message = "el nombre es requerido"))]
    pub name: String,
    #[validate(email(message = "correo electrónico inválido"))]
    pub email: String,
    #[validate(length(min = 2, max = 100, message = "la especialidad es requerida"))]
    pub specialty: String,
    #[validate(length(min = 2, max = 100, message = "la ciudad es requerida"))]
    pub city: String,
}

/// Update technician payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicianUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}
