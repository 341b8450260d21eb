//! Client (institution) Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Client ID type
pub type ClientId = RecordId;

/// Served institution. Tickets copy `name`/`city` at creation time,
/// so renaming a client does not rewrite its historic tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ClientId>,
    pub name: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Create client payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientCreate {
    #[validate(length(min = 2, max = 200, message = "el nombre es requerido"))]
    pub name: String,
    #[validate(length(min = 2, max = 100, message = "la ciudad es requerida"))]
    pub city: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Update client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
