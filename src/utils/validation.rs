//! Topology consistency checks.
//!
//! The builder guarantees these properties by construction. The checks are
//! run again on finished topologies by the CLI before export, and by tests.

use std::collections::HashSet;

use crate::topology::{Node, NodeRole, Topology};

/// Validate a finished topology
///
/// Checks for:
/// - Unique node names and unique interface names per router
/// - Links that reference known nodes and never loop back to one node
/// - Router endpoints carrying an interface and address, other endpoints none
/// - Hosts sharing a network with their default gateway
/// - Router interface addresses matching exactly the addresses used on
///   the router's links
///
/// # Returns
/// * `Ok(())` if validation succeeds
/// * `Err(String)` with an error message if validation fails
///
/// # Examples
/// ```
/// use labtopo::config::TopologyConfig;
/// use labtopo::topology::build;
/// use labtopo::utils::validation::validate_topology;
///
/// let topology = build(&TopologyConfig::default()).unwrap();
/// assert!(validate_topology(&topology).is_ok());
/// ```
pub fn validate_topology(topology: &Topology) -> Result<(), String> {
    let mut names = HashSet::new();
    for node in topology.nodes() {
        if !names.insert(node.name()) {
            return Err(format!("Duplicate node name '{}'", node.name()));
        }
        if let Node::Router(router) = node {
            let mut interfaces = HashSet::new();
            for interface in router.interfaces() {
                if !interfaces.insert(interface.name()) {
                    return Err(format!(
                        "Duplicate interface '{}' on router '{}'",
                        interface.name(),
                        router.name()
                    ));
                }
            }
        }
    }

    for (i, link) in topology.links().iter().enumerate() {
        if link.a().node() == link.b().node() {
            return Err(format!("Link {} connects '{}' to itself", i, link.a().node()));
        }
        for endpoint in link.endpoints() {
            let node = topology
                .node(endpoint.node())
                .ok_or_else(|| format!("Link {} references unknown node '{}'", i, endpoint.node()))?;
            let addressed = endpoint.address().is_some() && endpoint.interface().is_some();
            let bare = endpoint.address().is_none() && endpoint.interface().is_none();
            match node.role() {
                NodeRole::Router if !addressed => {
                    return Err(format!(
                        "Link {} router endpoint '{}' lacks an interface address",
                        i,
                        endpoint.node()
                    ));
                }
                NodeRole::Switch | NodeRole::Host if !bare => {
                    return Err(format!(
                        "Link {} endpoint '{}' must not carry address parameters",
                        i,
                        endpoint.node()
                    ));
                }
                _ => {}
            }
        }
    }

    for host in topology.hosts() {
        if !host.ip().contains(&host.default_route()) {
            return Err(format!(
                "Host '{}' address {} is not on the same network as gateway {}",
                host.name(),
                host.ip(),
                host.default_route()
            ));
        }
    }

    for router in topology.routers() {
        let assigned: HashSet<_> = router.interfaces().iter().map(|i| i.address()).collect();
        let used: HashSet<_> = topology
            .links_of(router.name())
            .filter_map(|l| l.endpoint_on(router.name()))
            .filter_map(|e| e.address())
            .collect();
        if assigned != used {
            return Err(format!(
                "Router '{}' has {} interface addresses but its links use {}",
                router.name(),
                assigned.len(),
                used.len()
            ));
        }
    }

    log::debug!("Topology '{}' passed validation ({})", topology.name(), topology.summary());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TopologyConfig;
    use crate::ip::Ipv4Net;
    use crate::topology::types::{Endpoint, Host, Link, Switch};
    use crate::topology::build;
    use std::net::Ipv4Addr;

    #[test]
    fn test_default_topology_passes() {
        let topology = build(&TopologyConfig::default()).unwrap();
        assert!(validate_topology(&topology).is_ok());
    }

    #[test]
    fn test_host_off_gateway_network() {
        let ip: Ipv4Net = "10.0.1.5/24".parse().unwrap();
        let nodes = vec![
            Node::Switch(Switch { name: "s1".to_string() }),
            Node::Host(Host {
                name: "h1".to_string(),
                ip,
                default_route: Ipv4Addr::new(10, 0, 0, 1),
            }),
        ];
        let links = vec![Link {
            endpoints: [Endpoint::plain("h1"), Endpoint::plain("s1")],
        }];
        let topology = Topology::from_parts("broken".to_string(), nodes, links);

        let err = validate_topology(&topology).unwrap_err();
        assert!(err.contains("same network"), "{}", err);
    }

    #[test]
    fn test_self_link_and_unknown_node() {
        let nodes = vec![Node::Switch(Switch { name: "s1".to_string() })];

        let looped = Topology::from_parts(
            "loop".to_string(),
            nodes.clone(),
            vec![Link { endpoints: [Endpoint::plain("s1"), Endpoint::plain("s1")] }],
        );
        assert!(validate_topology(&looped).unwrap_err().contains("itself"));

        let dangling = Topology::from_parts(
            "dangling".to_string(),
            nodes,
            vec![Link { endpoints: [Endpoint::plain("s1"), Endpoint::plain("s9")] }],
        );
        assert!(validate_topology(&dangling).unwrap_err().contains("unknown node"));
    }
}
