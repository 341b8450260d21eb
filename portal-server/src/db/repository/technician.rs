//! Technician Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Technician, TechnicianCreate, TechnicianUpdate};

#[derive(Clone)]
pub struct TechnicianRepository {
    base: BaseRepository,
}

impl TechnicianRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all technicians, grouped by city in the dashboard
    pub async fn find_all(&self) -> RepoResult<Vec<Technician>> {
        let technicians: Vec<Technician> = self
            .base
            .db()
            .query("SELECT * FROM technician ORDER BY city, name")
            .await?
            .take(0)?;
        Ok(technicians)
    }

    /// Find technician by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Technician>> {
        let thing: RecordId = parse_id(id)?;
        let technician: Option<Technician> = self.base.db().select(thing).await?;
        Ok(technician)
    }

    /// Create a new technician
    pub async fn create(&self, data: TechnicianCreate) -> RepoResult<Technician> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE technician SET
                    name = $name,
                    email = $email,
                    specialty = $specialty,
                    city = $city
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("email", data.email))
            .bind(("specialty", data.specialty))
            .bind(("city", data.city))
            .await?;

        let created: Option<Technician> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create technician".to_string()))
    }

    /// Update a technician
    pub async fn update(&self, id: &str, data: TechnicianUpdate) -> RepoResult<Technician> {
        let thing: RecordId = parse_id(id)?;
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Technician {} not found", id)));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    email = $email OR email,
                    specialty = $specialty OR specialty,
                    city = $city OR city
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("email", data.email))
            .bind(("specialty", data.specialty))
            .bind(("city", data.city))
            .await?;

        result
            .take::<Option<Technician>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Technician {} not found", id)))
    }

    /// Hard delete a technician. Tickets keep the denormalized name.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = parse_id(id)?;
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Technician {} not found", id)));
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}

fn parse_id(id: &str) -> RepoResult<RecordId> {
    id.parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
}
