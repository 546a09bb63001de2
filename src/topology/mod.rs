//! Platform topology: host roles and where they come from.

pub mod file;
pub mod roles;

pub use file::load_topology_file;
pub use roles::{HostRoleRegistry, Role};
