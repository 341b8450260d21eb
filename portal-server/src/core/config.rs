//! Server configuration

use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Default super-admin addresses; always resolve to admin regardless of
/// the role map.
const DEFAULT_SUPER_ADMIN_EMAILS: &str =
    "serviciotecnico@copiermastercyg.com.ec,gerencia@copiermastercyg.com.ec";

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/copyhelp/portal | working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | SUPER_ADMIN_EMAILS | (company addresses) | comma-separated admin overrides |
/// | JWT_SECRET | — | token signing secret (required in production) |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/copyhelp HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Emails that resolve to admin without a role-map entry
    pub super_admin_emails: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/copyhelp/portal".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            super_admin_emails: std::env::var("SUPER_ADMIN_EMAILS")
                .unwrap_or_else(|_| DEFAULT_SUPER_ADMIN_EMAILS.into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Override work directory and port, typically for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Database directory under the work dir
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Log directory under the work dir
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory structure if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}
