//! Repository Module
//!
//! CRUD operations over the embedded document store. Handlers map
//! [`RepoError`] to `AppError` at the API boundary.

pub mod account;
pub mod client;
pub mod contact_lead;
pub mod registration;
pub mod role_map;
pub mod technician;
pub mod ticket;

// Re-exports
pub use account::AccountRepository;
pub use client::ClientRepository;
pub use contact_lead::ContactLeadRepository;
pub use registration::RegistrationRepository;
pub use role_map::RoleMapRepository;
pub use technician::TechnicianRepository;
pub use ticket::{TicketRepository, TicketScope};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Conflict(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID convention: "table:id" strings end-to-end, parsed into RecordId at the
// repository boundary. CRUD calls take the RecordId directly.
// =============================================================================

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
