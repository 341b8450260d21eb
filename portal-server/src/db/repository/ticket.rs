//! Ticket Repository
//!
//! Role-scoped queries plus the three lifecycle mutations. Every mutation
//! bumps `rev`; callers may pass the rev they last saw to detect lost
//! updates.

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Ticket, TicketStatus};
use crate::utils::time;

/// Visibility scope for ticket queries, derived from the caller's role:
/// admins see everything, technicians their assignments, clients their
/// own submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketScope {
    All,
    AssignedTo(String),
    OwnedBy(String),
}

#[derive(Clone)]
pub struct TicketRepository {
    base: BaseRepository,
}

impl TicketRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find tickets visible in the given scope, newest first
    pub async fn find_scoped(&self, scope: &TicketScope) -> RepoResult<Vec<Ticket>> {
        let tickets: Vec<Ticket> = match scope {
            TicketScope::All => self
                .base
                .db()
                .query("SELECT * FROM ticket ORDER BY created_at DESC")
                .await?
                .take(0)?,
            TicketScope::AssignedTo(name) => self
                .base
                .db()
                .query("SELECT * FROM ticket WHERE assigned_to = $name ORDER BY created_at DESC")
                .bind(("name", name.clone()))
                .await?
                .take(0)?,
            TicketScope::OwnedBy(email) => self
                .base
                .db()
                .query("SELECT * FROM ticket WHERE email = $email ORDER BY created_at DESC")
                .bind(("email", email.clone()))
                .await?
                .take(0)?,
        };
        Ok(tickets)
    }

    /// Find ticket by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Ticket>> {
        let thing: RecordId = parse_id(id)?;
        let ticket: Option<Ticket> = self.base.db().select(thing).await?;
        Ok(ticket)
    }

    /// Create a new ticket
    pub async fn create(&self, ticket: Ticket) -> RepoResult<Ticket> {
        let created: Option<Ticket> = self.base.db().create("ticket").content(ticket).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create ticket".to_string()))
    }

    /// Assign a technician: sets `assigned_to` and moves the ticket to
    /// En Progreso in a single update.
    pub async fn assign(
        &self,
        id: &str,
        technician: &str,
        expected_rev: Option<u64>,
    ) -> RepoResult<Ticket> {
        let thing = self.existing_id(id).await?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    assigned_to = $technician,
                    status = $status,
                    rev += 1
                WHERE $has_rev = false OR rev = $rev
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("technician", technician.to_string()))
            .bind(("status", TicketStatus::EnProgreso))
            .bind(("has_rev", expected_rev.is_some()))
            .bind(("rev", expected_rev.unwrap_or_default()))
            .await?;

        result
            .take::<Option<Ticket>>(0)?
            .ok_or_else(|| RepoError::Conflict(format!("Ticket {} was modified concurrently", id)))
    }

    /// Set the lifecycle status (En Espera / Cerrado)
    pub async fn set_status(
        &self,
        id: &str,
        status: TicketStatus,
        expected_rev: Option<u64>,
    ) -> RepoResult<Ticket> {
        let thing = self.existing_id(id).await?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    status = $status,
                    rev += 1
                WHERE $has_rev = false OR rev = $rev
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("has_rev", expected_rev.is_some()))
            .bind(("rev", expected_rev.unwrap_or_default()))
            .await?;

        result
            .take::<Option<Ticket>>(0)?
            .ok_or_else(|| RepoError::Conflict(format!("Ticket {} was modified concurrently", id)))
    }

    /// Close a ticket out with its activity report
    #[allow(clippy::too_many_arguments)]
    pub async fn resolve(
        &self,
        id: &str,
        resolved_by: &str,
        resolution_details: &str,
        resolution_parts: Option<String>,
        pending_activities: Option<String>,
        observations: Option<String>,
        expected_rev: Option<u64>,
    ) -> RepoResult<Ticket> {
        let thing = self.existing_id(id).await?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    status = $status,
                    resolved_at = $resolved_at,
                    resolved_by = $resolved_by,
                    resolution_details = $resolution_details,
                    resolution_parts = $resolution_parts,
                    pending_activities = $pending_activities,
                    observations = $observations,
                    rev += 1
                WHERE $has_rev = false OR rev = $rev
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("status", TicketStatus::Resuelto))
            .bind(("resolved_at", time::now_millis()))
            .bind(("resolved_by", resolved_by.to_string()))
            .bind(("resolution_details", resolution_details.to_string()))
            .bind(("resolution_parts", resolution_parts))
            .bind(("pending_activities", pending_activities))
            .bind(("observations", observations))
            .bind(("has_rev", expected_rev.is_some()))
            .bind(("rev", expected_rev.unwrap_or_default()))
            .await?;

        result
            .take::<Option<Ticket>>(0)?
            .ok_or_else(|| RepoError::Conflict(format!("Ticket {} was modified concurrently", id)))
    }

    /// Parse the id and verify the ticket exists
    async fn existing_id(&self, id: &str) -> RepoResult<RecordId> {
        let thing: RecordId = parse_id(id)?;
        let existing: Option<Ticket> = self.base.db().select(thing.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Ticket {} not found", id)));
        }
        Ok(thing)
    }
}

fn parse_id(id: &str) -> RepoResult<RecordId> {
    id.parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
}
