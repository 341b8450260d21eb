//! Report API Handlers
//!
//! Both endpoints reuse the role-scoped ticket query, so a client's
//! report and export only ever cover their own tickets.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, header},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Ticket;
use crate::db::repository::TicketRepository;
use crate::reports::{self, ReportSummary};
use crate::utils::{AppError, AppResult, time};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Optional calendar-day filter (YYYY-MM-DD)
    pub date: Option<String>,
}

async fn scoped_tickets(
    state: &ServerState,
    user: &CurrentUser,
    query: &ReportQuery,
) -> AppResult<Vec<Ticket>> {
    let repo = TicketRepository::new(state.get_db());
    let tickets = repo
        .find_scoped(&user.ticket_scope())
        .await
        .map_err(AppError::from)?;

    match &query.date {
        Some(date) => {
            let day = time::parse_date(date)?;
            Ok(reports::filter_by_day(&tickets, day))
        }
        None => Ok(tickets),
    }
}

/// GET /api/reports/summary — aggregated counts and resolution rate
pub async fn summary(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ReportSummary>> {
    let tickets = scoped_tickets(&state, &user, &query).await?;
    Ok(Json(reports::aggregate(&tickets)))
}

/// GET /api/reports/export.csv — spreadsheet dump of the filtered list
pub async fn export_csv(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let tickets = scoped_tickets(&state, &user, &query).await?;

    if tickets.is_empty() {
        return Err(AppError::not_found(
            "No tickets to export for the selected date",
        ));
    }

    let csv_text = reports::to_csv(&tickets)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"reporte_tickets.csv\""),
    );

    Ok((headers, csv_text))
}
