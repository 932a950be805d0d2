//! Topology type definitions.
//!
//! A [`Topology`] is produced once by the builder and never changed
//! afterwards: every field is private and only read accessors are exposed.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;

use crate::ip::Ipv4Net;

/// Role of a node in the topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Router,
    Switch,
    Host,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self {
            NodeRole::Router => "router",
            NodeRole::Switch => "switch",
            NodeRole::Host => "host",
        };
        f.write_str(role)
    }
}

/// A named, addressed router interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    pub(crate) name: String,
    pub(crate) address: Ipv4Net,
}

impl Interface {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Ipv4Net {
        self.address
    }
}

/// A forwarding node terminating one or more segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Router {
    pub(crate) name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ip: Option<Ipv4Net>,
    pub(crate) forwarding: bool,
    pub(crate) interfaces: Vec<Interface>,
}

impl Router {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ip: None,
            forwarding: true,
            interfaces: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Default name for the next interface: `{router}-eth{n}`, n starting
    /// one past the current interface count and skipping names in use
    pub(crate) fn next_interface_name(&self) -> String {
        // `len` interfaces cannot occupy all `len + 1` candidates
        let first = self.interfaces.len() + 1;
        (first..=first + self.interfaces.len())
            .map(|n| format!("{}-eth{}", self.name, n))
            .find(|name| self.interface(name).is_none())
            .unwrap_or_default()
    }
}

/// A layer-2 relay with no addressing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Switch {
    pub(crate) name: String,
}

impl Switch {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An end host with one address and a default route via its segment gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Host {
    pub(crate) name: String,
    pub(crate) ip: Ipv4Net,
    pub(crate) default_route: Ipv4Addr,
}

impl Host {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ip(&self) -> Ipv4Net {
        self.ip
    }

    /// Gateway the default route points at
    pub fn default_route(&self) -> Ipv4Addr {
        self.default_route
    }
}

/// A topology node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Node {
    Router(Router),
    Switch(Switch),
    Host(Host),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Router(r) => &r.name,
            Node::Switch(s) => &s.name,
            Node::Host(h) => &h.name,
        }
    }

    pub fn role(&self) -> NodeRole {
        match self {
            Node::Router(_) => NodeRole::Router,
            Node::Switch(_) => NodeRole::Switch,
            Node::Host(_) => NodeRole::Host,
        }
    }

    /// Fixed node address; switches have none
    pub fn ip(&self) -> Option<Ipv4Net> {
        match self {
            Node::Router(r) => r.ip,
            Node::Switch(_) => None,
            Node::Host(h) => Some(h.ip),
        }
    }

    /// Forwarding capability, only defined for routers
    pub fn forwarding(&self) -> Option<bool> {
        match self {
            Node::Router(r) => Some(r.forwarding),
            _ => None,
        }
    }

    pub fn as_router(&self) -> Option<&Router> {
        match self {
            Node::Router(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_host(&self) -> Option<&Host> {
        match self {
            Node::Host(h) => Some(h),
            _ => None,
        }
    }
}

/// One side of a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub(crate) node: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) interface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) address: Option<Ipv4Net>,
}

impl Endpoint {
    /// Plain endpoint with no interface or address parameters
    pub(crate) fn plain(node: &str) -> Self {
        Self {
            node: node.to_string(),
            interface: None,
            address: None,
        }
    }

    pub(crate) fn addressed(node: &str, interface: &Interface) -> Self {
        Self {
            node: node.to_string(),
            interface: Some(interface.name.clone()),
            address: Some(interface.address),
        }
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    pub fn address(&self) -> Option<Ipv4Net> {
        self.address
    }
}

/// An undirected link between two distinct nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub(crate) endpoints: [Endpoint; 2],
}

impl Link {
    pub fn a(&self) -> &Endpoint {
        &self.endpoints[0]
    }

    pub fn b(&self) -> &Endpoint {
        &self.endpoints[1]
    }

    pub fn endpoints(&self) -> &[Endpoint; 2] {
        &self.endpoints
    }

    /// True if the link joins `x` and `y`, in either order
    pub fn connects(&self, x: &str, y: &str) -> bool {
        (self.a().node == x && self.b().node == y) || (self.a().node == y && self.b().node == x)
    }

    /// The endpoint on `node`'s side, if the link touches it
    pub fn endpoint_on(&self, node: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.node == node)
    }
}

/// Node counts of a topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopologySummary {
    pub routers: usize,
    pub switches: usize,
    pub hosts: usize,
    pub links: usize,
}

impl fmt::Display for TopologySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} routers, {} switches, {} hosts, {} links",
            self.routers, self.switches, self.hosts, self.links
        )
    }
}

/// The complete node/link graph handed to the emulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topology {
    name: String,
    nodes: Vec<Node>,
    links: Vec<Link>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Topology {
    /// Freeze a fully built node and link set. Names are unique by construction.
    pub(crate) fn from_parts(name: String, nodes: Vec<Node>, links: Vec<Link>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.name().to_string(), i))
            .collect();
        Self {
            name,
            nodes,
            links,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nodes in emission order: routers, switches, then hosts segment by segment
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    pub fn routers(&self) -> impl Iterator<Item = &Router> {
        self.nodes.iter().filter_map(Node::as_router)
    }

    pub fn switches(&self) -> impl Iterator<Item = &Switch> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Switch(s) => Some(s),
            _ => None,
        })
    }

    pub fn hosts(&self) -> impl Iterator<Item = &Host> {
        self.nodes.iter().filter_map(Node::as_host)
    }

    /// Links touching the given node
    pub fn links_of<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| l.endpoint_on(node).is_some())
    }

    pub fn summary(&self) -> TopologySummary {
        TopologySummary {
            routers: self.routers().count(),
            switches: self.switches().count(),
            hosts: self.hosts().count(),
            links: self.links.len(),
        }
    }
}
