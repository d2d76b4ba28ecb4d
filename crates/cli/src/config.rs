//! Command-line and topology file configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use topology::{NetworkTopology, Node, TopologyConfig};
use tracing::{debug, Level};

use crate::commands::Command;

/// Inspect a bookie network topology.
#[derive(Debug, Parser)]
#[command(name = "bktopo", version, about)]
pub struct CliConfig {
    /// JSON topology description. An empty topology is used if omitted.
    #[arg(short, long, global = true)]
    pub topology: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn run(self) -> anyhow::Result<()> {
        init_logging(self.verbose);

        let topology = match &self.topology {
            Some(path) => TopologyFile::load(path)?.build()?,
            None => NetworkTopology::new(),
        };
        let result = self.command.execute(&topology)?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        Ok(())
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// On-disk topology description.
///
/// ```json
/// {
///   "config": { "hop_weight": 1 },
///   "nodes": [
///     { "name": "10.0.0.1:3181", "location": "/dc1/rack1" },
///     { "name": "10.0.0.2:3181" }
///   ]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TopologyFile {
    pub config: TopologyConfig,
    pub nodes: Vec<NodeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct NodeEntry {
    pub name: String,
    /// Falls back to `config.default_rack`.
    pub location: Option<String>,
}

impl TopologyFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading topology file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing topology file {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn build(self) -> anyhow::Result<NetworkTopology> {
        let topology = NetworkTopology::with_config(self.config);
        for entry in self.nodes {
            let location = entry
                .location
                .unwrap_or_else(|| topology.config().default_rack.clone());
            let node = Node::leaf(entry.name, location);
            topology
                .add(&node)
                .with_context(|| format!("adding {}", node))?;
        }
        debug!(
            leaves = topology.leaf_count(),
            racks = topology.rack_count(),
            "loaded topology"
        );
        Ok(topology)
    }
}
