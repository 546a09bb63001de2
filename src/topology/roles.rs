//! Host role registry: which blade plays which part in the platform.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Pilot,
    DbPrimary,
    DbSecondary,
    Io,
}

impl Role {
    /// Lookup order for `role_of`; the first role listing a host wins.
    pub const ALL: [Role; 4] = [Role::Pilot, Role::DbPrimary, Role::DbSecondary, Role::Io];

    /// Both database roles, used wherever "any db host" is meant.
    pub const DATABASE: [Role; 2] = [Role::DbPrimary, Role::DbSecondary];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Pilot => "pilot",
            Role::DbPrimary => "db-primary",
            Role::DbSecondary => "db-secondary",
            Role::Io => "io",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable role -> host id table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRoleRegistry {
    roles: BTreeMap<Role, BTreeSet<String>>,
}

impl HostRoleRegistry {
    /// Build from a role table; roles not mentioned have no hosts.
    pub fn new<I, H, S>(table: I) -> Self
    where
        I: IntoIterator<Item = (Role, H)>,
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roles: BTreeMap<Role, BTreeSet<String>> = BTreeMap::new();
        for (role, hosts) in table {
            roles
                .entry(role)
                .or_default()
                .extend(hosts.into_iter().map(Into::into));
        }
        Self { roles }
    }

    /// Hosts configured for `role` (empty if none).
    pub fn role_hosts(&self, role: Role) -> BTreeSet<&str> {
        self.roles
            .get(&role)
            .map(|hosts| hosts.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Union of the hosts of every role in `roles`.
    pub fn hosts_in_any(&self, roles: &[Role]) -> BTreeSet<&str> {
        roles.iter().flat_map(|&role| self.role_hosts(role)).collect()
    }

    pub fn has_role(&self, host_id: &str, role: Role) -> bool {
        self.roles.get(&role).is_some_and(|hosts| hosts.contains(host_id))
    }

    /// The role of `host_id`, or `None` for hosts the table does not know.
    pub fn role_of(&self, host_id: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|&role| self.has_role(host_id, role))
    }
}

impl Default for HostRoleRegistry {
    /// The standard two-frame platform layout.
    fn default() -> Self {
        HostRoleRegistry::new([
            (Role::Pilot, vec!["0-0-1", "0-0-9"]),
            // EPAY call routing clients run here.
            (Role::DbPrimary, vec!["0-0-2", "0-0-10"]),
            (
                Role::DbSecondary,
                vec!["0-0-3", "0-0-11", "0-1-2", "0-1-10", "0-1-3", "0-1-11"],
            ),
            // EPAY notification clients run here.
            (Role::Io, vec!["0-0-4", "0-0-12"]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn role_of_is_total() {
        let reg = HostRoleRegistry::default();
        assert_eq!(reg.role_of("0-0-1"), Some(Role::Pilot));
        assert_eq!(reg.role_of("0-0-10"), Some(Role::DbPrimary));
        assert_eq!(reg.role_of("0-1-11"), Some(Role::DbSecondary));
        assert_eq!(reg.role_of("0-0-12"), Some(Role::Io));
        assert_eq!(reg.role_of("0-0-5"), None);
        assert_eq!(reg.role_of(""), None);
    }

    #[test]
    fn role_of_agrees_with_every_configured_host() {
        let reg = HostRoleRegistry::default();
        for role in Role::ALL {
            for host in reg.role_hosts(role) {
                assert_eq!(reg.role_of(host), Some(role), "{host}");
            }
        }
    }

    #[test]
    fn database_union() {
        let reg = HostRoleRegistry::default();
        let db = reg.hosts_in_any(&Role::DATABASE);
        assert_eq!(db.len(), 8);
        assert!(db.contains("0-0-2"));
        assert!(db.contains("0-1-3"));
        assert!(!db.contains("0-0-1"));
    }

    #[test]
    fn overlapping_roles_resolve_to_first() {
        let reg = HostRoleRegistry::new([(Role::Io, vec!["0-0-7"]), (Role::Pilot, vec!["0-0-7"])]);
        assert_eq!(reg.role_of("0-0-7"), Some(Role::Pilot));
        assert!(reg.has_role("0-0-7", Role::Io));
    }

    #[test]
    fn unconfigured_role_is_empty() {
        let reg = HostRoleRegistry::new([(Role::Pilot, vec!["0-0-1"])]);
        assert!(reg.role_hosts(Role::Io).is_empty());
    }
}
