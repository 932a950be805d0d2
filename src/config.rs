use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::Ipv4Addr;

/// Top-level topology configuration that mirrors the YAML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyConfig {
    /// Name the emulator selects this topology by
    pub name: String,
    /// The two gateway routers
    pub routers: Vec<RouterConfig>,
    /// Point-to-point link between `routers[0]` and `routers[1]`
    pub transit: TransitConfig,
    /// Switch segments, processed in declared order
    pub segments: Vec<SegmentConfig>,
}

/// A gateway router
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    pub name: String,
}

/// The router-to-router transit link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Subnet of the link. The first router takes the gateway address,
    /// the second router the next one.
    pub subnet: Ipv4Net,
}

/// One switch, its hosts and the subnet they share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Human-readable segment label, used in error messages
    pub label: String,
    /// Name of the segment switch
    pub switch: String,
    /// Segment subnet; the gateway is its first usable address
    pub subnet: Ipv4Net,
    /// Number of hosts attached to the switch
    pub hosts: u32,
    /// Host names are `{host_prefix}{index}`, index counting from 1
    pub host_prefix: String,
    /// Router terminating this segment
    pub router: String,
    /// (Optional) Router interface name. Defaults to `{router}-eth{n}`,
    /// where n is the lowest number past the router's existing interface
    /// count that no other interface on the router already uses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid router configuration: {0}")]
    InvalidRouters(String),
    #[error("Invalid segment configuration: {0}")]
    InvalidSegment(String),
    #[error("Invalid subnet configuration: {0}")]
    InvalidSubnet(String),
}

impl TopologyConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_routers()?;

        if self.segments.is_empty() {
            return Err(ValidationError::InvalidSegment(
                "at least one segment is required".to_string(),
            ));
        }

        let mut labels = HashSet::new();
        for segment in &self.segments {
            if segment.label.trim().is_empty() {
                return Err(ValidationError::InvalidSegment(
                    "segment label cannot be empty".to_string(),
                ));
            }
            if !labels.insert(segment.label.as_str()) {
                return Err(ValidationError::InvalidSegment(format!(
                    "segment label '{}' is declared twice",
                    segment.label
                )));
            }
            if segment.switch.trim().is_empty() {
                return Err(ValidationError::InvalidSegment(format!(
                    "segment '{}' has an empty switch name",
                    segment.label
                )));
            }
            if segment.host_prefix.trim().is_empty() {
                return Err(ValidationError::InvalidSegment(format!(
                    "segment '{}' has an empty host prefix",
                    segment.label
                )));
            }
            if self.router_index(&segment.router).is_none() {
                return Err(ValidationError::InvalidSegment(format!(
                    "segment '{}' is attached to undeclared router '{}'",
                    segment.label, segment.router
                )));
            }
        }

        self.validate_subnets()
    }

    /// Exactly two distinct, non-empty router names
    fn validate_routers(&self) -> Result<(), ValidationError> {
        if self.routers.len() != 2 {
            return Err(ValidationError::InvalidRouters(format!(
                "exactly two routers are required, found {}",
                self.routers.len()
            )));
        }
        if self.routers.iter().any(|r| r.name.trim().is_empty()) {
            return Err(ValidationError::InvalidRouters(
                "router name cannot be empty".to_string(),
            ));
        }
        if self.routers[0].name == self.routers[1].name {
            return Err(ValidationError::InvalidRouters(format!(
                "router '{}' is declared twice",
                self.routers[0].name
            )));
        }
        Ok(())
    }

    /// Segment and transit subnets must be network addresses and pairwise disjoint
    fn validate_subnets(&self) -> Result<(), ValidationError> {
        let declared = std::iter::once(("transit", self.transit.subnet))
            .chain(self.segments.iter().map(|s| (s.label.as_str(), s.subnet)));
        for (owner, subnet) in declared {
            if subnet.trunc() != subnet {
                return Err(ValidationError::InvalidSubnet(format!(
                    "{} subnet {} has host bits set (network is {})",
                    owner,
                    subnet,
                    subnet.trunc()
                )));
            }
        }

        let mut claimed: Vec<(&str, Ipv4Net)> = vec![("transit", self.transit.subnet)];
        for segment in &self.segments {
            if let Some((owner, subnet)) = claimed
                .iter()
                .find(|(_, subnet)| subnet.contains(&segment.subnet) || segment.subnet.contains(subnet))
            {
                return Err(ValidationError::InvalidSubnet(format!(
                    "segment '{}' subnet {} overlaps {} subnet {}",
                    segment.label, segment.subnet, owner, subnet
                )));
            }
            claimed.push((segment.label.as_str(), segment.subnet));
        }
        Ok(())
    }

    /// Position of a router in the `routers` list
    pub fn router_index(&self, name: &str) -> Option<usize> {
        self.routers.iter().position(|r| r.name == name)
    }

    /// Total number of hosts across all segments
    pub fn total_hosts(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.hosts)).sum()
    }
}

impl SegmentConfig {
    fn new(label: &str, switch: &str, subnet: Ipv4Net, hosts: u32, host_prefix: &str, router: &str) -> Self {
        Self {
            label: label.to_string(),
            switch: switch.to_string(),
            subnet,
            hosts,
            host_prefix: host_prefix.to_string(),
            router: router.to_string(),
            interface: None,
        }
    }
}

const KOAS_SUBNET: Ipv4Net = Ipv4Net::new_assert(Ipv4Addr::new(192, 168, 244, 0), 26);
const INTERNSHIP_SUBNET: Ipv4Net = Ipv4Net::new_assert(Ipv4Addr::new(192, 168, 244, 64), 27);
const SPESIALIS_SUBNET: Ipv4Net = Ipv4Net::new_assert(Ipv4Addr::new(192, 168, 244, 96), 28);
const RESIDEN_SUBNET: Ipv4Net = Ipv4Net::new_assert(Ipv4Addr::new(192, 168, 244, 112), 29);
const TRANSIT_SUBNET: Ipv4Net = Ipv4Net::new_assert(Ipv4Addr::new(192, 168, 244, 120), 30);

/// The canonical four-segment layout: two segments behind each router,
/// carved out of 192.168.244.0/24.
impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            name: "mytopo".to_string(),
            routers: vec![
                RouterConfig { name: "r0".to_string() },
                RouterConfig { name: "r1".to_string() },
            ],
            transit: TransitConfig {
                subnet: TRANSIT_SUBNET,
            },
            segments: vec![
                SegmentConfig::new("koas", "s1", KOAS_SUBNET, 61, "K", "r0"),
                SegmentConfig::new("internship", "s2", INTERNSHIP_SUBNET, 29, "I", "r0"),
                SegmentConfig::new("spesialis", "s3", SPESIALIS_SUBNET, 13, "S", "r1"),
                SegmentConfig::new("residen", "s4", RESIDEN_SUBNET, 5, "R", "r1"),
            ],
        }
    }
}
