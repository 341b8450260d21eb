//! Role resolution
//!
//! Maps an authenticated identity to its portal role. The super-admin
//! override comes first, then the shared role map; an identity in neither
//! has no access. Resolution is deterministic for a fixed
//! (email, uid, role map) triple and happens on every request — there is
//! no cached role state outside the request.

use crate::db::models::{Role, RoleMap};
use crate::db::repository::TicketScope;

/// Resolves roles against the configured super-admin set and a role map
#[derive(Debug, Clone)]
pub struct RoleResolver {
    super_admin_emails: Vec<String>,
}

impl RoleResolver {
    pub fn new(super_admin_emails: Vec<String>) -> Self {
        Self { super_admin_emails }
    }

    /// Resolve the role for an identity. `None` means access denied;
    /// a failed role-map read is handled identically by the caller.
    pub fn resolve(&self, email: &str, uid: &str, role_map: &RoleMap) -> Option<Role> {
        if self
            .super_admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email))
        {
            return Some(Role::Admin);
        }
        role_map.get(uid)
    }
}

/// Authenticated request identity with its resolved role.
///
/// Built by the auth middleware and injected into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Account uid
    pub uid: String,
    /// Account email
    pub email: String,
    /// Display name (tickets reference technicians by this value)
    pub display_name: String,
    /// Resolved role
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins and technicians may act on tickets
    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Technician)
    }

    /// Ticket visibility scope for this identity
    pub fn ticket_scope(&self) -> TicketScope {
        match self.role {
            Role::Admin => TicketScope::All,
            Role::Technician => TicketScope::AssignedTo(self.display_name.clone()),
            Role::Client => TicketScope::OwnedBy(self.email.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolver() -> RoleResolver {
        RoleResolver::new(vec![
            "serviciotecnico@copiermastercyg.com.ec".to_string(),
            "gerencia@copiermastercyg.com.ec".to_string(),
        ])
    }

    fn map(entries: &[(&str, Role)]) -> RoleMap {
        RoleMap {
            roles: entries
                .iter()
                .map(|(uid, role)| (uid.to_string(), *role))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn super_admin_email_overrides_role_map() {
        let resolver = resolver();
        let role_map = map(&[("u1", Role::Client)]);
        // Even with a client entry, the override wins
        assert_eq!(
            resolver.resolve("serviciotecnico@copiermastercyg.com.ec", "u1", &role_map),
            Some(Role::Admin)
        );
    }

    #[test]
    fn resolves_from_role_map_by_uid() {
        let resolver = resolver();
        let role_map = map(&[("u1", Role::Technician)]);
        assert_eq!(
            resolver.resolve("ana@taller.ec", "u1", &role_map),
            Some(Role::Technician)
        );
    }

    #[test]
    fn unknown_identity_is_denied() {
        let resolver = resolver();
        let role_map = map(&[("u1", Role::Technician)]);
        assert_eq!(resolver.resolve("otro@taller.ec", "u2", &role_map), None);
    }

    #[test]
    fn resolution_is_deterministic() {
        let resolver = resolver();
        let role_map = map(&[("u1", Role::Client), ("u2", Role::Technician)]);
        let first = resolver.resolve("cliente@empresa.ec", "u1", &role_map);
        for _ in 0..10 {
            assert_eq!(
                resolver.resolve("cliente@empresa.ec", "u1", &role_map),
                first
            );
        }
    }

    #[test]
    fn technician_scope_follows_display_name() {
        let ana = CurrentUser {
            uid: "u1".into(),
            email: "ana@taller.ec".into(),
            display_name: "Ana".into(),
            role: Role::Technician,
        };
        assert_eq!(ana.ticket_scope(), TicketScope::AssignedTo("Ana".into()));

        let admin = CurrentUser {
            uid: "u0".into(),
            email: "gerencia@copiermastercyg.com.ec".into(),
            display_name: "Gerencia".into(),
            role: Role::Admin,
        };
        assert_eq!(admin.ticket_scope(), TicketScope::All);
    }
}
