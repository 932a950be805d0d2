//! Topology export.
//!
//! Renders a built topology as JSON or YAML for the emulator to consume.

use std::path::Path;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;

use crate::topology::Topology;

/// Output format of an exported topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension()?.to_str()? {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// Render a topology in the given format
pub fn render(topology: &Topology, format: Format) -> Result<String> {
    let text = match format {
        Format::Json => {
            serde_json::to_string_pretty(topology).wrap_err("Failed to serialize topology as JSON")?
        }
        Format::Yaml => serde_yaml::to_string(topology).wrap_err("Failed to serialize topology as YAML")?,
    };
    Ok(text)
}

/// Write a topology to `path`, creating parent directories as needed
pub fn write_topology(topology: &Topology, path: &Path, format: Format) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create output directory '{}'", parent.display()))?;
    }
    let text = render(topology, format)?;
    std::fs::write(path, text)
        .wrap_err_with(|| format!("Failed to write topology to '{}'", path.display()))?;
    info!("Wrote topology '{}' ({}) to {:?}", topology.name(), topology.summary(), path);
    Ok(())
}
