//! Database Module
//!
//! Embedded SurrealDB document store. Collections are schemaless; legacy
//! records missing dashboard defaults are normalized on the read path by
//! the model serde defaults.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "copyhelp";
const DATABASE: &str = "portal";

/// Database service — owns the embedded store handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk store under the work directory
    pub async fn open(path: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_indexes(&db).await?;

        tracing::info!("Database opened at {}", path.display());
        Ok(Self { db })
    }

    /// In-memory store for tests
    pub async fn memory() -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_indexes(&db).await?;
        Ok(Self { db })
    }

    async fn define_indexes(db: &Surreal<Db>) -> Result<(), AppError> {
        // Unique email per account; the rest of the schema stays open
        db.query("DEFINE INDEX IF NOT EXISTS account_email ON account FIELDS email UNIQUE")
            .await
            .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;
        Ok(())
    }
}
