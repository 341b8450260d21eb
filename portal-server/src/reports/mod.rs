//! Service reports
//!
//! Aggregation is a pure function of the (already role-scoped) ticket
//! list; export is a direct field mapping with no round-trip obligations.

pub mod aggregate;
pub mod export;

pub use aggregate::{IncidentCount, ReportSummary, StatusCount, aggregate, filter_by_day};
pub use export::to_csv;
