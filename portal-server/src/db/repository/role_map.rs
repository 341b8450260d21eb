//! Role Map Repository
//!
//! The role map lives in one well-known record (`role_map:current`).
//! Assignment merges a key in; removal rewrites the record without it,
//! mirroring how the dashboard has always managed it.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult};
use crate::db::models::{Role, RoleEntry, RoleMap};

const ROLE_MAP_TABLE: &str = "role_map";
const ROLE_MAP_KEY: &str = "current";

#[derive(Clone)]
pub struct RoleMapRepository {
    base: BaseRepository,
}

impl RoleMapRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Load the shared role map; absent record means an empty map
    pub async fn get(&self) -> RepoResult<RoleMap> {
        let map: Option<RoleMap> = self
            .base
            .db()
            .select((ROLE_MAP_TABLE, ROLE_MAP_KEY))
            .await?;
        Ok(map.unwrap_or_default())
    }

    /// Look up the role for a uid
    pub async fn role_of(&self, uid: &str) -> RepoResult<Option<Role>> {
        Ok(self.get().await?.get(uid))
    }

    /// List all entries for the admin dashboard
    pub async fn entries(&self) -> RepoResult<Vec<RoleEntry>> {
        let map = self.get().await?;
        let mut entries: Vec<RoleEntry> = map
            .roles
            .into_iter()
            .map(|(uid, role)| RoleEntry { uid, role })
            .collect();
        entries.sort_by(|a, b| a.uid.cmp(&b.uid));
        Ok(entries)
    }

    /// Merge a uid → role assignment into the map
    pub async fn assign(&self, uid: &str, role: Role) -> RepoResult<RoleMap> {
        let mut map = self.get().await?;
        map.roles.insert(uid.to_string(), role);
        self.store(map).await
    }

    /// Remove a uid from the map (no-op if absent)
    pub async fn remove(&self, uid: &str) -> RepoResult<RoleMap> {
        let mut map = self.get().await?;
        map.roles.remove(uid);
        self.store(map).await
    }

    async fn store(&self, map: RoleMap) -> RepoResult<RoleMap> {
        let stored: Option<RoleMap> = self
            .base
            .db()
            .upsert((ROLE_MAP_TABLE, ROLE_MAP_KEY))
            .content(map)
            .await?;
        Ok(stored.unwrap_or_default())
    }
}
