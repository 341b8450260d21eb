//! Database Models

// Serde helpers
pub mod serde_helpers;

// Auth
pub mod account;
pub mod role_map;

// Support domain
pub mod client;
pub mod registration;
pub mod technician;
pub mod ticket;

// Marketing
pub mod contact_lead;

// Re-exports
pub use account::{
    Account, AccountId, AccountInfo, LoginRequest, LoginResponse, RegisterRequest, UserInfo,
};
pub use client::{Client, ClientCreate, ClientId, ClientUpdate};
pub use contact_lead::{ContactLead, ContactLeadCreate, ContactLeadId};
pub use registration::{Registration, RegistrationId, RegistrationStatus};
pub use role_map::{Role, RoleAssign, RoleEntry, RoleMap};
pub use technician::{Technician, TechnicianCreate, TechnicianId, TechnicianUpdate};
pub use ticket::{
    IncidentType, Priority, Ticket, TicketAssign, TicketCreate, TicketId, TicketResolve,
    TicketSetStatus, TicketStatus, UNASSIGNED,
};
