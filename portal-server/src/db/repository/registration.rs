//! Registration Request Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Registration, RegistrationStatus};

#[derive(Clone)]
pub struct RegistrationRepository {
    base: BaseRepository,
}

impl RegistrationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find pending registrations, newest first
    pub async fn find_pending(&self) -> RepoResult<Vec<Registration>> {
        let registrations: Vec<Registration> = self
            .base
            .db()
            .query(
                "SELECT * FROM registration WHERE status = $status ORDER BY created_at DESC",
            )
            .bind(("status", RegistrationStatus::Pending))
            .await?
            .take(0)?;
        Ok(registrations)
    }

    /// Find all registrations (used to enrich the user list)
    pub async fn find_all(&self) -> RepoResult<Vec<Registration>> {
        let registrations: Vec<Registration> = self
            .base
            .db()
            .query("SELECT * FROM registration ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(registrations)
    }

    /// Create a new registration request
    pub async fn create(&self, registration: Registration) -> RepoResult<Registration> {
        let created: Option<Registration> = self
            .base
            .db()
            .create("registration")
            .content(registration)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create registration".to_string()))
    }

    /// Mark a registration approved or rejected
    pub async fn set_status(
        &self,
        id: &str,
        status: RegistrationStatus,
    ) -> RepoResult<Registration> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status))
            .await?;

        result
            .take::<Option<Registration>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Registration {} not found", id)))
    }

    /// Mark the registration belonging to a uid as approved, if any.
    /// Used as the follow-up write after a role assignment.
    pub async fn approve_by_uid(&self, uid: &str) -> RepoResult<Option<Registration>> {
        let mut result = self
            .base
            .db()
            .query("UPDATE registration SET status = $status WHERE uid = $uid RETURN AFTER")
            .bind(("status", RegistrationStatus::Approved))
            .bind(("uid", uid.to_string()))
            .await?;

        let updated: Vec<Registration> = result.take(0)?;
        Ok(updated.into_iter().next())
    }
}
