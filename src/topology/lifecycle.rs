//! Router lifecycle hooks.
//!
//! The emulator owns the kernel forwarding state. It calls
//! [`Router::on_activate`] before a router carries traffic and
//! [`Router::on_deactivate`] before tearing it down; both hooks issue their
//! command through the emulator's [`NodeShell`]. The builder never runs them.

use log::info;

use super::types::{Router, Topology};

/// Command enabling IPv4 forwarding inside a router's namespace
pub const ENABLE_FORWARDING: &str = "sysctl net.ipv4.ip_forward=1";

/// Command disabling IPv4 forwarding inside a router's namespace
pub const DISABLE_FORWARDING: &str = "sysctl net.ipv4.ip_forward=0";

/// A shell command failed on a node
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("command '{command}' failed on {node}: {reason}")]
pub struct ShellError {
    pub node: String,
    pub command: String,
    pub reason: String,
}

/// Runs commands inside an emulated node. Implemented by the emulator.
pub trait NodeShell {
    fn cmd(&mut self, node: &str, command: &str) -> Result<String, ShellError>;
}

impl Router {
    /// Enable forwarding. Must run before the router is used.
    pub fn on_activate(&self, shell: &mut dyn NodeShell) -> Result<(), ShellError> {
        shell.cmd(&self.name, ENABLE_FORWARDING)?;
        Ok(())
    }

    /// Disable forwarding. Must run before the router is destroyed.
    pub fn on_deactivate(&self, shell: &mut dyn NodeShell) -> Result<(), ShellError> {
        shell.cmd(&self.name, DISABLE_FORWARDING)?;
        Ok(())
    }
}

/// Activate every router in node order. Stops at the first failure.
pub fn activate_routers(topology: &Topology, shell: &mut dyn NodeShell) -> Result<usize, ShellError> {
    let mut activated = 0;
    for router in topology.routers() {
        router.on_activate(shell)?;
        activated += 1;
    }
    Ok(activated)
}

/// Deactivate every router in reverse node order. Stops at the first failure.
pub fn deactivate_routers(topology: &Topology, shell: &mut dyn NodeShell) -> Result<usize, ShellError> {
    let routers: Vec<&Router> = topology.routers().collect();
    for router in routers.iter().rev() {
        router.on_deactivate(shell)?;
    }
    Ok(routers.len())
}

/// A shell that only logs and records the commands it is asked to run.
///
/// Used by the CLI to show what the emulator would execute.
#[derive(Debug, Default)]
pub struct DryRunShell {
    commands: Vec<(String, String)>,
}

impl DryRunShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(node, command)` pairs in call order
    pub fn commands(&self) -> &[(String, String)] {
        &self.commands
    }
}

impl NodeShell for DryRunShell {
    fn cmd(&mut self, node: &str, command: &str) -> Result<String, ShellError> {
        info!("[{}] {}", node, command);
        self.commands.push((node.to_string(), command.to_string()));
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TopologyConfig;
    use crate::topology::builder::build;

    /// Fails every command on one node
    struct FailingShell {
        broken: &'static str,
        seen: Vec<String>,
    }

    impl NodeShell for FailingShell {
        fn cmd(&mut self, node: &str, command: &str) -> Result<String, ShellError> {
            self.seen.push(node.to_string());
            if node == self.broken {
                return Err(ShellError {
                    node: node.to_string(),
                    command: command.to_string(),
                    reason: "namespace gone".to_string(),
                });
            }
            Ok(String::new())
        }
    }

    #[test]
    fn test_activate_and_deactivate_order() {
        let topo = build(&TopologyConfig::default()).unwrap();
        let mut shell = DryRunShell::new();

        assert_eq!(activate_routers(&topo, &mut shell).unwrap(), 2);
        assert_eq!(deactivate_routers(&topo, &mut shell).unwrap(), 2);

        let expected = vec![
            ("r0".to_string(), ENABLE_FORWARDING.to_string()),
            ("r1".to_string(), ENABLE_FORWARDING.to_string()),
            ("r1".to_string(), DISABLE_FORWARDING.to_string()),
            ("r0".to_string(), DISABLE_FORWARDING.to_string()),
        ];
        assert_eq!(shell.commands(), expected.as_slice());
    }

    #[test]
    fn test_single_router_hooks() {
        let topo = build(&TopologyConfig::default()).unwrap();
        let router = topo.routers().next().unwrap();
        let mut shell = DryRunShell::new();

        router.on_activate(&mut shell).unwrap();
        router.on_deactivate(&mut shell).unwrap();
        assert_eq!(shell.commands().len(), 2);
        assert_eq!(shell.commands()[0].1, "sysctl net.ipv4.ip_forward=1");
        assert_eq!(shell.commands()[1].1, "sysctl net.ipv4.ip_forward=0");
    }

    #[test]
    fn test_activation_stops_on_failure() {
        let topo = build(&TopologyConfig::default()).unwrap();
        let mut shell = FailingShell {
            broken: "r0",
            seen: Vec::new(),
        };

        let err = activate_routers(&topo, &mut shell).unwrap_err();
        assert_eq!(err.node, "r0");
        assert_eq!(shell.seen, vec!["r0".to_string()]);
        assert_eq!(
            err.to_string(),
            "command 'sysctl net.ipv4.ip_forward=1' failed on r0: namespace gone"
        );
    }
}
