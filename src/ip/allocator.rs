//! Per-segment address planning.
//!
//! An [`AddressPlanner`] maps an index to an address inside one subnet.
//! Index 0 is the gateway (`base + 1`); indices `1..=capacity` are the
//! assignable host addresses in ascending order. The planner keeps no
//! state, so any index can be requested again and yields the same answer.

use ipnet::{Ipv4Net, PrefixLenError};

/// Addresses reserved in every block: network, broadcast and gateway
const RESERVED_ADDRESSES: u64 = 3;

/// Errors raised by the address planner
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("{subnet} has host bits set (network is {})", .subnet.trunc())]
    NotANetwork { subnet: Ipv4Net },

    #[error("{subnet} is too small to hold a gateway and a host")]
    NoGateway { subnet: Ipv4Net },

    #[error("{subnet} holds {capacity} assignable addresses, {requested} requested")]
    Exhausted {
        subnet: Ipv4Net,
        requested: u64,
        capacity: u64,
    },

    #[error("invalid prefix length")]
    Prefix(#[from] PrefixLenError),
}

/// Deterministic address source for a single subnet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressPlanner {
    subnet: Ipv4Net,
    gateway: Ipv4Net,
}

impl AddressPlanner {
    /// Index of the gateway address
    pub const GATEWAY_INDEX: u64 = 0;

    /// Create a planner for a network address. Blocks smaller than /30
    /// cannot hold a gateway next to at least one host and are rejected.
    pub fn new(subnet: Ipv4Net) -> Result<Self, AllocationError> {
        if subnet.trunc() != subnet {
            return Err(AllocationError::NotANetwork { subnet });
        }
        if subnet.prefix_len() > 30 {
            return Err(AllocationError::NoGateway { subnet });
        }
        let gateway = Self::nth_address(subnet, Self::GATEWAY_INDEX)?;
        Ok(Self { subnet, gateway })
    }

    pub fn subnet(&self) -> Ipv4Net {
        self.subnet
    }

    /// Number of host addresses available after the gateway
    pub fn capacity(&self) -> u64 {
        capacity_of(self.subnet)
    }

    /// The first usable address of the block
    pub fn gateway(&self) -> Ipv4Net {
        self.gateway
    }

    /// Address for `index`, counted from the gateway
    pub fn address(&self, index: u64) -> Result<Ipv4Net, AllocationError> {
        if index > self.capacity() {
            return Err(AllocationError::Exhausted {
                subnet: self.subnet,
                requested: index,
                capacity: self.capacity(),
            });
        }
        Self::nth_address(self.subnet, index)
    }

    /// The first `count` host addresses, in ascending order.
    ///
    /// Fails before yielding anything when `count` exceeds the capacity.
    pub fn hosts(
        &self,
        count: u64,
    ) -> Result<impl Iterator<Item = Result<Ipv4Net, AllocationError>>, AllocationError> {
        if count > self.capacity() {
            return Err(AllocationError::Exhausted {
                subnet: self.subnet,
                requested: count,
                capacity: self.capacity(),
            });
        }
        let planner = *self;
        Ok((1..=count).map(move |index| planner.address(index)))
    }

    /// The `index`th usable address of `subnet`, carrying the subnet's prefix
    fn nth_address(subnet: Ipv4Net, index: u64) -> Result<Ipv4Net, AllocationError> {
        let exhausted = || AllocationError::Exhausted {
            subnet,
            requested: index,
            capacity: capacity_of(subnet),
        };
        let offset = usize::try_from(index).map_err(|_| exhausted())?;
        let addr = subnet.hosts().nth(offset).ok_or_else(exhausted)?;
        Ok(Ipv4Net::new(addr, subnet.prefix_len())?)
    }
}

fn capacity_of(subnet: Ipv4Net) -> u64 {
    let block = u64::from(u32::from(subnet.hostmask())) + 1;
    block.saturating_sub(RESERVED_ADDRESSES)
}
