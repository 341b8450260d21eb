//! Report aggregation
//!
//! Pure, synchronous summaries of a ticket list. Handlers fetch the
//! role-scoped list first, so a client's report only ever covers their
//! own tickets.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::models::{IncidentType, Ticket, TicketStatus};
use crate::utils::time;

/// Tickets sharing one lifecycle status
#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: TicketStatus,
    pub count: usize,
}

/// Tickets sharing one incident category
#[derive(Debug, Clone, Serialize)]
pub struct IncidentCount {
    pub incident: IncidentType,
    pub count: usize,
}

/// Aggregated view of a ticket list
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub resolved: usize,
    /// Percentage of resolved tickets; absent for an empty list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_rate: Option<f64>,
    /// Present statuses in lifecycle order
    pub status_counts: Vec<StatusCount>,
    /// Incident categories, most frequent first
    pub incident_counts: Vec<IncidentCount>,
}

const STATUS_ORDER: [TicketStatus; 5] = [
    TicketStatus::Abierto,
    TicketStatus::EnProgreso,
    TicketStatus::EnEspera,
    TicketStatus::Resuelto,
    TicketStatus::Cerrado,
];

/// Keep only tickets created on the given calendar day
pub fn filter_by_day(tickets: &[Ticket], day: NaiveDate) -> Vec<Ticket> {
    let start = time::day_start_millis(day);
    let end = time::day_end_millis(day);
    tickets
        .iter()
        .filter(|t| t.created_at >= start && t.created_at < end)
        .cloned()
        .collect()
}

/// Summarize a ticket list: per-status counts, incident frequencies and
/// the resolution rate.
pub fn aggregate(tickets: &[Ticket]) -> ReportSummary {
    let mut by_status: HashMap<TicketStatus, usize> = HashMap::new();
    let mut by_incident: HashMap<IncidentType, usize> = HashMap::new();

    for ticket in tickets {
        *by_status.entry(ticket.status).or_default() += 1;
        *by_incident.entry(ticket.tipo_incidente).or_default() += 1;
    }

    let status_counts = STATUS_ORDER
        .iter()
        .filter_map(|status| {
            by_status.get(status).map(|&count| StatusCount {
                status: *status,
                count,
            })
        })
        .collect();

    let mut incident_counts: Vec<IncidentCount> = by_incident
        .into_iter()
        .map(|(incident, count)| IncidentCount { incident, count })
        .collect();
    // Most frequent first; alphabetical within equal counts so the
    // ordering is a pure function of the input list
    incident_counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.incident.as_str().cmp(b.incident.as_str()))
    });

    let total = tickets.len();
    let resolved = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Resuelto)
        .count();
    let resolution_rate = if total > 0 {
        Some((resolved as f64 / total as f64) * 100.0)
    } else {
        None
    };

    ReportSummary {
        total,
        resolved,
        resolution_rate,
        status_counts,
        incident_counts,
    }
}
