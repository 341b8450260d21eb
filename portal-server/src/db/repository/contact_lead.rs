//! Contact Lead Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{ContactLead, ContactLeadCreate};
use crate::utils::time;

#[derive(Clone)]
pub struct ContactLeadRepository {
    base: BaseRepository,
}

impl ContactLeadRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all leads, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<ContactLead>> {
        let leads: Vec<ContactLead> = self
            .base
            .db()
            .query("SELECT * FROM contact_lead ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(leads)
    }

    /// Store a lead from the public contact form
    pub async fn create(&self, data: ContactLeadCreate) -> RepoResult<ContactLead> {
        let lead = ContactLead {
            id: None,
            name: data.name,
            email: data.email,
            message: data.message,
            created_at: time::now_millis(),
        };
        let created: Option<ContactLead> =
            self.base.db().create("contact_lead").content(lead).await?;
        created.ok_or_else(|| RepoError::Database("Failed to store contact lead".to_string()))
    }
}
