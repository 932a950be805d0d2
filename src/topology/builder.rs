//! Topology construction.
//!
//! [`build`] turns a [`TopologyConfig`] into a frozen [`Topology`] in a single
//! pass. Emission order is fixed so that identical input always yields
//! identical names, addresses and orderings:
//!
//! - nodes: routers, then one switch per segment, then each segment's hosts
//!   in ascending index order;
//! - links: switch-to-router per segment, the router-to-router transit link,
//!   then host-to-switch links segment by segment.
//!
//! Nothing is returned unless every node and link was built.

use std::collections::HashSet;

use crate::config::{SegmentConfig, TopologyConfig};
use crate::ip::{AddressPlanner, AddressRegistry, Ipv4Net};

use super::error::BuildError;
use super::types::{Endpoint, Host, Interface, Link, Node, Router, Switch, Topology};

/// Linux interface names are limited to 15 bytes
pub const MAX_INTERFACE_NAME_LEN: usize = 15;

/// Address plan for one segment, computed before any node is created
struct SegmentPlan<'a> {
    segment: &'a SegmentConfig,
    gateway: Ipv4Net,
    hosts: Vec<Ipv4Net>,
}

impl<'a> SegmentPlan<'a> {
    fn new(segment: &'a SegmentConfig) -> Result<Self, BuildError> {
        let planner =
            AddressPlanner::new(segment.subnet).map_err(|e| BuildError::for_segment(&segment.label, e))?;
        let hosts = planner
            .hosts(u64::from(segment.hosts))
            .map_err(|e| BuildError::for_segment(&segment.label, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| BuildError::for_segment(&segment.label, e))?;
        Ok(Self {
            segment,
            gateway: planner.gateway(),
            hosts,
        })
    }

    fn host_name(&self, index: usize) -> String {
        format!("{}{}", self.segment.host_prefix, index + 1)
    }
}

/// Nodes and links collected so far, with the uniqueness bookkeeping
#[derive(Default)]
struct Draft {
    names: HashSet<String>,
    addresses: AddressRegistry,
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl Draft {
    fn add_node(&mut self, node: Node) -> Result<(), BuildError> {
        if !self.names.insert(node.name().to_string()) {
            return Err(BuildError::NamingConflict {
                scope: "node".to_string(),
                name: node.name().to_string(),
            });
        }
        self.nodes.push(node);
        Ok(())
    }

    fn claim(&mut self, address: Ipv4Net, owner: &str) -> Result<(), BuildError> {
        self.addresses.register(address.addr(), owner)?;
        Ok(())
    }

    fn link(&mut self, a: Endpoint, b: Endpoint) -> Result<(), BuildError> {
        if a.node == b.node {
            return Err(BuildError::Configuration(format!(
                "link would connect '{}' to itself",
                a.node
            )));
        }
        self.links.push(Link { endpoints: [a, b] });
        Ok(())
    }

    fn finish(self, name: &str) -> Topology {
        Topology::from_parts(name.to_string(), self.nodes, self.links)
    }
}

/// Add an interface to `router`, rejecting duplicate or over-long names
fn attach(router: &mut Router, name: String, address: Ipv4Net) -> Result<Interface, BuildError> {
    if name.is_empty() || name.len() > MAX_INTERFACE_NAME_LEN {
        return Err(BuildError::Configuration(format!(
            "interface name '{}' on router '{}' must be 1-{} bytes",
            name, router.name, MAX_INTERFACE_NAME_LEN
        )));
    }
    if router.interface(&name).is_some() {
        return Err(BuildError::NamingConflict {
            scope: format!("interface on router '{}'", router.name),
            name,
        });
    }
    let interface = Interface { name, address };
    router.interfaces.push(interface.clone());
    Ok(interface)
}

/// Build the complete topology described by `config`.
pub fn build(config: &TopologyConfig) -> Result<Topology, BuildError> {
    config.validate()?;

    let transit = AddressPlanner::new(config.transit.subnet)
        .map_err(|e| BuildError::Configuration(format!("transit link: {}", e)))?;
    let transit_far = transit
        .address(1)
        .map_err(|e| BuildError::Configuration(format!("transit link: {}", e)))?;

    let plans = config
        .segments
        .iter()
        .map(SegmentPlan::new)
        .collect::<Result<Vec<_>, _>>()?;

    let mut routers: Vec<Router> = config.routers.iter().map(|r| Router::new(&r.name)).collect();

    // One interface per terminated segment, in declared order
    let mut uplinks: Vec<(usize, Interface)> = Vec::with_capacity(plans.len());
    for plan in &plans {
        let idx = config.router_index(&plan.segment.router).ok_or_else(|| {
            BuildError::Configuration(format!(
                "segment '{}' is attached to undeclared router '{}'",
                plan.segment.label, plan.segment.router
            ))
        })?;
        let router = &mut routers[idx];
        let name = plan
            .segment
            .interface
            .clone()
            .unwrap_or_else(|| router.next_interface_name());
        uplinks.push((idx, attach(router, name, plan.gateway)?));
    }

    // Transit interfaces come after the segment interfaces
    let near_name = routers[0].next_interface_name();
    let near = attach(&mut routers[0], near_name, transit.gateway())?;
    let far_name = routers[1].next_interface_name();
    let far = attach(&mut routers[1], far_name, transit_far)?;

    let mut draft = Draft::default();
    for router in &mut routers {
        router.ip = router.interfaces.first().map(Interface::address);
        for interface in &router.interfaces {
            draft.claim(interface.address, &interface.name)?;
        }
    }

    let router_names: Vec<String> = routers.iter().map(|r| r.name.clone()).collect();
    for router in routers {
        draft.add_node(Node::Router(router))?;
    }
    for plan in &plans {
        draft.add_node(Node::Switch(Switch {
            name: plan.segment.switch.clone(),
        }))?;
    }

    for (plan, (idx, interface)) in plans.iter().zip(&uplinks) {
        draft.link(
            Endpoint::plain(&plan.segment.switch),
            Endpoint::addressed(&router_names[*idx], interface),
        )?;
    }
    draft.link(
        Endpoint::addressed(&router_names[0], &near),
        Endpoint::addressed(&router_names[1], &far),
    )?;

    for plan in &plans {
        for (index, ip) in plan.hosts.iter().enumerate() {
            let name = plan.host_name(index);
            draft.claim(*ip, &name)?;
            draft.add_node(Node::Host(Host {
                name: name.clone(),
                ip: *ip,
                default_route: plan.gateway.addr(),
            }))?;
            draft.link(Endpoint::plain(&name), Endpoint::plain(&plan.segment.switch))?;
        }
    }

    Ok(draft.finish(&config.name))
}
