//! IP address planning and bookkeeping.
//!
//! This module turns segment subnets into gateway and host addresses and
//! keeps track of which node owns which address while a topology is built.
//! Subnets and interface addresses are both [`Ipv4Net`] values: a subnet has
//! no host bits set, an interface address keeps its host bits.

pub mod allocator;
pub mod registry;

// Re-export commonly used types
pub use allocator::{AddressPlanner, AllocationError};
pub use ipnet::Ipv4Net;
pub use registry::{AddressConflict, AddressRegistry};
