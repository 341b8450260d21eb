//! Server state

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{JwtService, RoleResolver};
use crate::core::Config;
use crate::db::DbService;

/// Server state — shared references to every service.
///
/// Cloned per request via `Arc`-backed fields; no request-spanning
/// mutable state lives here. Role resolution in particular is
/// request-scoped: the resolver is consulted with a fresh role-map read
/// on every call.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable)
    pub config: Config,
    /// Embedded document store
    pub db: Surreal<Db>,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// Role resolver (super-admin overrides)
    pub role_resolver: Arc<RoleResolver>,
}

impl ServerState {
    /// Create server state from parts
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let role_resolver = Arc::new(RoleResolver::new(config.super_admin_emails.clone()));
        Self {
            config,
            db,
            jwt_service,
            role_resolver,
        }
    }

    /// Initialize state for a real deployment: work-dir structure plus the
    /// on-disk database.
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be initialized.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_service = DbService::open(&config.database_dir())
            .await
            .expect("Failed to initialize database");

        Self::new(config.clone(), db_service.db)
    }

    /// Initialize state over an in-memory database (tests)
    pub async fn initialize_in_memory(config: &Config) -> Self {
        let db_service = DbService::memory()
            .await
            .expect("Failed to initialize in-memory database");
        Self::new(config.clone(), db_service.db)
    }

    /// Database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Role resolver
    pub fn role_resolver(&self) -> &RoleResolver {
        &self.role_resolver
    }
}
