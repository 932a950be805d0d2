use crate::config::TopologyConfig;
use crate::topology::catalog;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse a topology configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<TopologyConfig> {
    info!("Loading topology configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: TopologyConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    info!(
        "Loaded topology '{}' with {} segments and {} hosts",
        config.name,
        config.segments.len(),
        config.total_hosts()
    );

    config.validate()?;

    Ok(config)
}

/// Resolve the configuration to build: an explicit file wins over a
/// built-in topology name
pub fn resolve_config(config_path: Option<&Path>, topo: &str) -> Result<TopologyConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => {
            info!("Using built-in topology '{}'", topo);
            catalog::lookup(topo).ok_or_else(|| {
                eyre!(
                    "Unknown topology '{}' (available: {})",
                    topo,
                    catalog::names().join(", ")
                )
            })
        }
    }
}

/// Write a configuration to a YAML file, e.g. as a starting point for edits
pub fn write_config(config: &TopologyConfig, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(config).wrap_err("Failed to serialize configuration")?;
    std::fs::write(path, yaml)
        .wrap_err_with(|| format!("Failed to write configuration '{}'", path.display()))?;
    info!("Wrote topology configuration '{}' to {:?}", config.name, path);
    Ok(())
}
