//! # labtopo - Segmented routed topologies for network emulators
//!
//! This library derives a complete, static lab topology (two gateway
//! routers, one switch per segment, hosts behind each switch, and every link
//! between them) from a handful of segment and subnet parameters.
//!
//! ## Overview
//!
//! Each segment is a switch plus its hosts and the subnet they share. The
//! first usable address of the subnet is the gateway, bound to an interface
//! on the router that terminates the segment; hosts take the following
//! addresses in order. The two routers are joined by a point-to-point
//! transit link with its own small subnet.
//!
//! The build is a pure, deterministic, single-pass computation: identical
//! input yields identical names, addresses and orderings, and either the
//! whole topology is produced or an error is returned.
//!
//! ## Architecture
//!
//! - `ip`: per-segment address planning over `ipnet` subnets, address registry
//! - `config`: topology configuration structures and validation
//! - `config_loader`: YAML loading and built-in topology selection
//! - `topology`: node/link model, builder, router lifecycle hooks, catalog
//! - `export`: JSON/YAML rendering of a built topology
//! - `utils`: post-build validation
//!
//! ## Example Usage
//!
//! ```rust
//! use labtopo::config::TopologyConfig;
//! use labtopo::topology::build;
//!
//! let topology = build(&TopologyConfig::default())?;
//! let summary = topology.summary();
//! assert_eq!(summary.hosts, 108);
//! assert_eq!(summary.links, 113);
//! # Ok::<(), labtopo::topology::BuildError>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! name: mytopo
//! routers:
//!   - name: r0
//!   - name: r1
//! transit:
//!   subnet: "192.168.244.120/30"
//! segments:
//!   - label: koas
//!     switch: s1
//!     subnet: "192.168.244.0/26"
//!     hosts: 61
//!     host_prefix: K
//!     router: r0
//! ```
//!
//! ## Router Lifecycle
//!
//! The emulator calls `Router::on_activate` before a router carries traffic
//! and `Router::on_deactivate` before destroying it. Both run their command
//! through the emulator's `NodeShell`; the builder itself never does.
//!
//! ## Error Handling
//!
//! The core returns typed errors (`BuildError`, `AllocationError`,
//! `ValidationError`). The loader, exporter and CLI use
//! `color_eyre` for error reporting with context.

pub mod config;
pub mod config_loader;
pub mod export;
pub mod ip;
pub mod topology;
pub mod utils;
