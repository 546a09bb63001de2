//! Topology file (topology.json): an alternative role table.
//!
//! JSON shape:
//! {
//!   "roles": {
//!     "pilot":        ["0-0-1", "0-0-9"],
//!     "db-primary":   ["0-0-2", "0-0-10"],
//!     "db-secondary": ["0-0-3", "0-0-11"],
//!     "io":           ["0-0-4", "0-0-12"]
//!   }
//! }
//!
//! Roles left out have no hosts. Host ids must look like `frame-shelf-slot`.

use crate::Result;
use crate::topology::roles::{HostRoleRegistry, Role};
use anyhow::{Context, bail};
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopologySpec {
    #[serde(default)]
    pub roles: BTreeMap<Role, Vec<String>>,
}

impl TopologySpec {
    /// Check host ids and build the registry.
    ///
    /// A host listed under two roles is allowed (lookups take the first role)
    /// but worth a warning.
    pub fn validate_and_build(&self) -> Result<HostRoleRegistry> {
        let host_re = Regex::new(r"^[0-9]+-[0-9]+-[0-9]+$")?;

        let mut seen: HashMap<&str, Role> = HashMap::new();
        let mut shared: Vec<(&str, Role, Role)> = Vec::new();
        for (&role, hosts) in &self.roles {
            for host in hosts {
                if !host_re.is_match(host) {
                    bail!("bad host id {:?} for role {} in topology", host, role);
                }
                match seen.insert(host.as_str(), role) {
                    Some(prev) if prev != role => shared.push((host.as_str(), prev, role)),
                    _ => {}
                }
            }
        }

        let registry = HostRoleRegistry::new(
            self.roles.iter().map(|(&role, hosts)| (role, hosts.iter().cloned())),
        );
        for (host, a, b) in shared {
            if let Some(resolved) = registry.role_of(host) {
                warn!("host {} is listed under both {} and {}, treating it as {}", host, a, b, resolved);
            }
        }
        Ok(registry)
    }
}

/// Load and validate a topology file.
pub fn load_topology_file(path: &str) -> Result<HostRoleRegistry> {
    let text = fs::read_to_string(path).with_context(|| format!("read topology file {}", path))?;
    let spec: TopologySpec =
        serde_json::from_str(&text).with_context(|| format!("parse topology file {}", path))?;
    spec.validate_and_build()
        .with_context(|| format!("validate topology file {}", path))
}
