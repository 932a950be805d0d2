//! Built-in topologies, selectable by name.

use crate::config::TopologyConfig;

/// Name selected when none is given
pub const DEFAULT_TOPOLOGY: &str = "mytopo";

const NAMES: &[&str] = &[DEFAULT_TOPOLOGY];

/// Names of all built-in topologies
pub fn names() -> &'static [&'static str] {
    NAMES
}

/// Configuration of the built-in topology called `name`
pub fn lookup(name: &str) -> Option<TopologyConfig> {
    match name {
        DEFAULT_TOPOLOGY => Some(TopologyConfig::default()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves() {
        for name in names() {
            let config = lookup(name).unwrap();
            assert_eq!(config.name, *name);
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!(lookup("dumbbell").is_none());
    }
}
