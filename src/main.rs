use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::path::PathBuf;

use labtopo::config_loader;
use labtopo::export::{self, Format};
use labtopo::topology::{activate_routers, build, catalog, deactivate_routers, DryRunShell};
use labtopo::utils::validate_topology;

/// Segmented router/switch/host topology generator for network emulators
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a topology configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Built-in topology to build when no configuration file is given
    #[arg(short, long, default_value = catalog::DEFAULT_TOPOLOGY)]
    topo: String,

    /// Write the topology to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (defaults to the output file extension, then JSON)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// List built-in topologies and exit
    #[arg(long)]
    list: bool,

    /// Write the selected configuration as YAML to this path and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,

    /// Log the router activation and deactivation commands an emulator would run
    #[arg(long)]
    dry_run_lifecycle: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if args.list {
        for name in catalog::names() {
            println!("{}", name);
        }
        return Ok(());
    }

    if args.config.is_some() && args.topo != catalog::DEFAULT_TOPOLOGY {
        warn!("Both --config and --topo given; using the configuration file");
    }
    let config = config_loader::resolve_config(args.config.as_deref(), &args.topo)?;

    if let Some(path) = &args.dump_config {
        config_loader::write_config(&config, path)?;
        return Ok(());
    }

    let topology = build(&config)?;
    validate_topology(&topology).map_err(|e| eyre!("Built topology failed validation: {}", e))?;
    info!("Built topology '{}': {}", topology.name(), topology.summary());

    if args.dry_run_lifecycle {
        let mut shell = DryRunShell::new();
        let activated = activate_routers(&topology, &mut shell)?;
        deactivate_routers(&topology, &mut shell)?;
        info!("Dry run issued {} commands for {} routers", shell.commands().len(), activated);
    }

    match &args.output {
        Some(path) => {
            let format = args
                .format
                .or_else(|| Format::from_path(path))
                .unwrap_or(Format::Json);
            export::write_topology(&topology, path, format)?;
        }
        None => {
            let format = args.format.unwrap_or(Format::Json);
            println!("{}", export::render(&topology, format)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["labtopo"]);

        assert_eq!(args.config, None);
        assert_eq!(args.topo, "mytopo");
        assert_eq!(args.output, None);
        assert_eq!(args.format, None);
        assert!(!args.list);
        assert!(!args.dry_run_lifecycle);
    }

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from([
            "labtopo",
            "--config", "campus.yaml",
            "--output", "out/topo.yaml",
            "--format", "yaml",
            "--dry-run-lifecycle",
        ]);

        assert_eq!(args.config, Some(PathBuf::from("campus.yaml")));
        assert_eq!(args.output, Some(PathBuf::from("out/topo.yaml")));
        assert_eq!(args.format, Some(Format::Yaml));
        assert!(args.dry_run_lifecycle);
    }

    #[test]
    fn test_dump_config_args() {
        let args = Args::parse_from(["labtopo", "--topo", "mytopo", "--dump-config", "mytopo.yaml"]);
        assert_eq!(args.dump_config, Some(PathBuf::from("mytopo.yaml")));
    }
}
