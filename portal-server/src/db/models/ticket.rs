//! Support Ticket Model
//!
//! Wire values stay in Spanish: they are the domain vocabulary shared with
//! the dashboard and the exported reports.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Ticket ID type
pub type TicketId = RecordId;

/// Display value for a ticket nobody has picked up yet
pub const UNASSIGNED: &str = "Sin asignar";

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TicketStatus {
    #[default]
    #[serde(rename = "Abierto")]
    Abierto,
    #[serde(rename = "En Progreso")]
    EnProgreso,
    #[serde(rename = "En Espera")]
    EnEspera,
    #[serde(rename = "Resuelto")]
    Resuelto,
    #[serde(rename = "Cerrado")]
    Cerrado,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Abierto => "Abierto",
            TicketStatus::EnProgreso => "En Progreso",
            TicketStatus::EnEspera => "En Espera",
            TicketStatus::Resuelto => "Resuelto",
            TicketStatus::Cerrado => "Cerrado",
        }
    }
}

/// Ticket priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Baja")]
    Baja,
    #[default]
    #[serde(rename = "Media")]
    Media,
    #[serde(rename = "Alta")]
    Alta,
    #[serde(rename = "Urgente")]
    Urgente,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Baja => "Baja",
            Priority::Media => "Media",
            Priority::Alta => "Alta",
            Priority::Urgente => "Urgente",
        }
    }
}

/// Reported incident category (printer service domain)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentType {
    #[serde(rename = "Error de Impresión")]
    ErrorDeImpresion,
    #[serde(rename = "Atasco de Papel")]
    AtascoDePapel,
    #[serde(rename = "Problema de Calidad")]
    ProblemaDeCalidad,
    #[serde(rename = "Consumibles")]
    Consumibles,
    #[serde(rename = "Conectividad")]
    Conectividad,
    #[serde(rename = "Configuración")]
    Configuracion,
    #[serde(rename = "Otro")]
    Otro,
}

impl IncidentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentType::ErrorDeImpresion => "Error de Impresión",
            IncidentType::AtascoDePapel => "Atasco de Papel",
            IncidentType::ProblemaDeCalidad => "Problema de Calidad",
            IncidentType::Consumibles => "Consumibles",
            IncidentType::Conectividad => "Conectividad",
            IncidentType::Configuracion => "Configuración",
            IncidentType::Otro => "Otro",
        }
    }
}

/// Support ticket matching the `ticket` table
///
/// Records written before the dashboard enforced defaults may miss
/// `status`, `priority` or `assigned_to`; the read path fills them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<TicketId>,
    pub name: String,
    pub email: String,
    pub institucion: String,
    pub ciudad: String,
    pub tipo_incidente: IncidentType,
    pub description: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_assigned_to")]
    pub assigned_to: String,
    pub created_at: i64,
    #[serde(default)]
    pub rev: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_parts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_activities: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

fn default_assigned_to() -> String {
    UNASSIGNED.to_string()
}

impl Ticket {
    /// Short id shown in tables and exports (first 6 chars of the key)
    pub fn short_id(&self) -> String {
        self.id
            .as_ref()
            .map(|id| {
                let key = id.key().to_string();
                key.chars().take(6).collect()
            })
            .unwrap_or_default()
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_to != UNASSIGNED
    }
}

/// Create ticket payload
///
/// `institucion` carries the client record id; the handler denormalizes
/// the client's name and city into the stored ticket.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TicketCreate {
    pub institucion: String,
    pub tipo_incidente: IncidentType,
    #[validate(length(
        min = 10,
        max = 500,
        message = "la descripción debe tener entre 10 y 500 caracteres"
    ))]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

/// Assign ticket payload (admin only)
#[derive(Debug, Clone, Deserialize)]
pub struct TicketAssign {
    pub technician: String,
    #[serde(default)]
    pub expected_rev: Option<u64>,
}

/// Set-status payload (waiting / closed)
#[derive(Debug, Clone, Deserialize)]
pub struct TicketSetStatus {
    pub status: TicketStatus,
    #[serde(default)]
    pub expected_rev: Option<u64>,
}

/// Resolution report payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TicketResolve {
    #[validate(length(
        min = 10,
        max = 1500,
        message = "debes detallar las actividades realizadas"
    ))]
    pub resolution_details: String,
    #[serde(default)]
    pub resolution_parts: Option<String>,
    #[serde(default)]
    pub pending_activities: Option<String>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub expected_rev: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_status_defaults_to_abierto() {
        // Legacy record without status/priority/assigned_to
        let raw = serde_json::json!({
            "name": "Colegio San José",
            "email": "sistemas@sanjose.edu.ec",
            "institucion": "Colegio San José",
            "ciudad": "Quito",
            "tipo_incidente": "Atasco de Papel",
            "description": "La impresora atasca cada tres páginas",
            "created_at": 1_710_000_000_000i64,
        });
        let ticket: Ticket = serde_json::from_value(raw).unwrap();
        assert_eq!(ticket.status, TicketStatus::Abierto);
        assert_eq!(ticket.priority, Priority::Media);
        assert_eq!(ticket.assigned_to, UNASSIGNED);
        assert!(!ticket.is_assigned());
    }

    #[test]
    fn status_round_trips_spanish_wire_values() {
        let json = serde_json::to_string(&TicketStatus::EnProgreso).unwrap();
        assert_eq!(json, "\"En Progreso\"");
        let back: TicketStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TicketStatus::EnProgreso);
    }

    #[test]
    fn resolve_payload_enforces_min_length() {
        use validator::Validate;

        let short = TicketResolve {
            resolution_details: "muy corto".into(), // 9 chars
            resolution_parts: None,
            pending_activities: None,
            observations: None,
            expected_rev: None,
        };
        assert!(short.validate().is_err());

        let exact = TicketResolve {
            resolution_details: "0123456789".into(), // exactly 10
            resolution_parts: None,
            pending_activities: None,
            observations: None,
            expected_rev: None,
        };
        assert!(exact.validate().is_ok());
    }
}
