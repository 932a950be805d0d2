//! Topology build errors.

use crate::config::ValidationError;
use crate::ip::{AddressConflict, AllocationError, Ipv4Net};

/// Reasons a topology cannot be built. Every variant is fatal to the build.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A segment asks for more hosts than its subnet can hold
    #[error("segment '{segment}' requests {requested} hosts but {subnet} holds only {capacity}")]
    Capacity {
        segment: String,
        subnet: Ipv4Net,
        requested: u64,
        capacity: u64,
    },

    /// Two nodes, or two interfaces on one router, share a name
    #[error("{scope} name '{name}' is already in use")]
    NamingConflict { scope: String, name: String },

    /// Missing or invalid segment-to-router mapping, malformed subnet, or
    /// an address handed out twice
    #[error("invalid topology configuration: {0}")]
    Configuration(String),
}

impl BuildError {
    /// Attribute a planner failure to the segment that triggered it
    pub(crate) fn for_segment(segment: &str, err: AllocationError) -> Self {
        match err {
            AllocationError::Exhausted {
                subnet,
                requested,
                capacity,
            } => BuildError::Capacity {
                segment: segment.to_string(),
                subnet,
                requested,
                capacity,
            },
            other => BuildError::Configuration(format!("segment '{}': {}", segment, other)),
        }
    }
}

impl From<ValidationError> for BuildError {
    fn from(err: ValidationError) -> Self {
        BuildError::Configuration(err.to_string())
    }
}

impl From<AddressConflict> for BuildError {
    fn from(err: AddressConflict) -> Self {
        BuildError::Configuration(err.to_string())
    }
}
