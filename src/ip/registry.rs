//! Address registry.
//!
//! Tracks which owner (host name or router interface) holds each address
//! while a topology is assembled, so that no address is handed out twice.

use std::collections::HashMap;
use std::net::Ipv4Addr;

/// An address was requested by a second owner
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("address {address} requested by {requested} is already assigned to {existing}")]
pub struct AddressConflict {
    pub address: Ipv4Addr,
    pub existing: String,
    pub requested: String,
}

/// Registry of assigned addresses
#[derive(Debug, Default)]
pub struct AddressRegistry {
    /// Address -> owner
    assigned: HashMap<Ipv4Addr, String>,
}

impl AddressRegistry {
    /// Record `address` as owned by `owner`.
    ///
    /// Registering the same address again for the same owner is a no-op.
    pub fn register(&mut self, address: Ipv4Addr, owner: &str) -> Result<(), AddressConflict> {
        match self.assigned.get(&address) {
            Some(existing) if existing == owner => Ok(()),
            Some(existing) => Err(AddressConflict {
                address,
                existing: existing.clone(),
                requested: owner.to_string(),
            }),
            None => {
                self.assigned.insert(address, owner.to_string());
                Ok(())
            }
        }
    }
}
