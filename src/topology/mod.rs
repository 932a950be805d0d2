//! Network topology module.
//!
//! This module contains the topology data model, the builder that derives
//! it from a configuration, the router lifecycle hooks and the catalog of
//! built-in topologies.

pub mod types;
pub mod error;
pub mod builder;
pub mod lifecycle;
pub mod catalog;

// Re-export key types and functions for easier access
pub use types::{Endpoint, Host, Interface, Link, Node, NodeRole, Router, Switch, Topology, TopologySummary};
pub use error::BuildError;
pub use builder::build;
pub use lifecycle::{activate_routers, deactivate_routers, DryRunShell, NodeShell, ShellError};
