//! CopyHelp Portal Server
//!
//! Support-ticketing backend for a printer and office-equipment service
//! company: role-gated ticket lifecycle, user registration with admin
//! approval, technician/client administration, contact-lead capture and
//! report exports.
//!
//! # Module structure
//!
//! ```text
//! portal-server/src/
//! ├── core/       # config, state, HTTP server
//! ├── auth/       # JWT sessions, role resolution, route guards
//! ├── api/        # HTTP routes and handlers
//! ├── db/         # embedded document store, models, repositories
//! ├── reports/    # aggregation and spreadsheet export
//! └── utils/      # errors, logging, time, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod reports;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService, RoleResolver};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - tracing with a dedicated target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
