//! Spreadsheet export
//!
//! One-way dump of a ticket list as CSV, one row per ticket, with the
//! same columns the dashboard always exported. Dates use
//! `dd/MM/yyyy HH:mm`; absent values export as `N/A`.

use csv::Writer;

use crate::db::models::{Ticket, UNASSIGNED};
use crate::utils::{AppError, AppResult, time};

/// Column headers, in export order
pub const EXPORT_HEADERS: [&str; 12] = [
    "ID Ticket",
    "Cliente",
    "Email",
    "Institución",
    "Ciudad",
    "Tipo de Incidente",
    "Descripción",
    "Prioridad",
    "Estado",
    "Técnico Asignado",
    "Fecha Creación",
    "Fecha Resolución",
];

/// Serialize tickets to CSV
pub fn to_csv(tickets: &[Ticket]) -> AppResult<String> {
    let mut writer = Writer::from_writer(Vec::new());

    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|e| AppError::internal(format!("CSV header write failed: {e}")))?;

    for ticket in tickets {
        writer
            .write_record(export_row(ticket))
            .map_err(|e| AppError::internal(format!("CSV row write failed: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::internal(format!("CSV encoding failed: {e}")))
}

fn export_row(ticket: &Ticket) -> [String; 12] {
    let assigned = if ticket.assigned_to.is_empty() {
        UNASSIGNED.to_string()
    } else {
        ticket.assigned_to.clone()
    };
    [
        ticket.short_id(),
        ticket.name.clone(),
        ticket.email.clone(),
        ticket.institucion.clone(),
        ticket.ciudad.clone(),
        ticket.tipo_incidente.as_str().to_string(),
        ticket.description.clone(),
        ticket.priority.as_str().to_string(),
        ticket.status.as_str().to_string(),
        assigned,
        time::format_export_datetime(ticket.created_at),
        ticket
            .resolved_at
            .map(time::format_export_datetime)
            .unwrap_or_else(|| "N/A".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{IncidentType, Priority, TicketStatus};
    use surrealdb::RecordId;

    fn resolved_ticket() -> Ticket {
        Ticket {
            id: Some(RecordId::from_table_key("ticket", "a1b2c3d4e5")),
            name: "Municipio de Loja".into(),
            email: "ti@loja.gob.ec".into(),
            institucion: "Municipio de Loja".into(),
            ciudad: "Loja".into(),
            tipo_incidente: IncidentType::ProblemaDeCalidad,
            description: "Las copias salen con líneas verticales".into(),
            status: TicketStatus::Resuelto,
            priority: Priority::Alta,
            assigned_to: "Carlos Vera".into(),
            created_at: 1_710_493_500_000, // 15/03/2024 09:05
            rev: 3,
            resolved_at: Some(1_710_504_000_000), // 15/03/2024 12:00
            resolved_by: Some("Carlos Vera".into()),
            resolution_details: Some("Se cambió el cilindro y se calibró".into()),
            resolution_parts: Some("Cilindro DK-1150".into()),
            pending_activities: None,
            observations: None,
        }
    }

    #[test]
    fn export_reparse_round_trips_id_status_and_dates() {
        let ticket = resolved_ticket();
        let csv_text = to_csv(std::slice::from_ref(&ticket)).unwrap();

        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "ID Ticket");

        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], ticket.short_id());
        assert_eq!(&record[8], "Resuelto");
        assert_eq!(&record[10], "15/03/2024 09:05");
        assert_eq!(&record[11], "15/03/2024 12:00");
    }

    #[test]
    fn unresolved_dates_export_as_na() {
        let mut ticket = resolved_ticket();
        ticket.status = TicketStatus::Abierto;
        ticket.resolved_at = None;
        let csv_text = to_csv(std::slice::from_ref(&ticket)).unwrap();

        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[11], "N/A");
    }

    #[test]
    fn one_row_per_ticket_plus_header() {
        let tickets = vec![resolved_ticket(), resolved_ticket(), resolved_ticket()];
        let csv_text = to_csv(&tickets).unwrap();
        assert_eq!(csv_text.lines().count(), 4);
    }
}
