//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - registration, login, session
//! - [`contact`] - marketing-site lead capture
//! - [`tickets`] - support ticket lifecycle
//! - [`technicians`] - technician management
//! - [`clients`] - client management
//! - [`registrations`] - pending registration review
//! - [`roles`] - role map administration
//! - [`reports`] - aggregated summaries and exports

pub mod auth;
pub mod health;

// Data model APIs
pub mod clients;
pub mod contact;
pub mod registrations;
pub mod reports;
pub mod roles;
pub mod technicians;
pub mod tickets;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
