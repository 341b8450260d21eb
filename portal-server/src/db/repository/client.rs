//! Client Repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Client, ClientCreate, ClientUpdate};

#[derive(Clone)]
pub struct ClientRepository {
    base: BaseRepository,
}

impl ClientRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all clients, alphabetically
    pub async fn find_all(&self) -> RepoResult<Vec<Client>> {
        let clients: Vec<Client> = self
            .base
            .db()
            .query("SELECT * FROM client ORDER BY name")
            .await?
            .take(0)?;
        Ok(clients)
    }

    /// Find client by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Client>> {
        let thing: RecordId = parse_id(id)?;
        let client: Option<Client> = self.base.db().select(thing).await?;
        Ok(client)
    }

    /// Create a new client
    pub async fn create(&self, data: ClientCreate) -> RepoResult<Client> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE client SET
                    name = $name,
                    city = $city,
                    contact_person = $contact_person,
                    phone = $phone
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("city", data.city))
            .bind(("contact_person", data.contact_person))
            .bind(("phone", data.phone))
            .await?;

        let created: Option<Client> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create client".to_string()))
    }

    /// Update a client. Existing tickets keep the denormalized
    /// institution/city copied at creation time.
    pub async fn update(&self, id: &str, data: ClientUpdate) -> RepoResult<Client> {
        let thing: RecordId = parse_id(id)?;
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Client {} not found", id)));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    city = $city OR city,
                    contact_person = $contact_person OR contact_person,
                    phone = $phone OR phone
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("city", data.city))
            .bind(("contact_person", data.contact_person))
            .bind(("phone", data.phone))
            .await?;

        result
            .take::<Option<Client>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Client {} not found", id)))
    }

    /// Hard delete a client
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = parse_id(id)?;
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Client {} not found", id)));
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
