//! Role Map Model
//!
//! The entire authorization model is one record: uid → role.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Access role of a portal user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Technician,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Technician => "technician",
            Role::Client => "client",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shared role-map record (`role_map:current`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleMap {
    #[serde(default)]
    pub roles: HashMap<String, Role>,
}

impl RoleMap {
    pub fn get(&self, uid: &str) -> Option<Role> {
        self.roles.get(uid).copied()
    }
}

/// A single role-map entry, for listing in the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleEntry {
    pub uid: String,
    pub role: Role,
}

/// Assign-role payload
#[derive(Debug, Clone, Deserialize)]
pub struct RoleAssign {
    pub role: Role,
}
