//! CLI tool for inspecting bookie topologies.
//!
//! Provides commands for:
//! - Network distance and same-rack checks between bookies
//! - Listing racks and leaves
//! - Validating ledger creation parameters

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::{CliConfig, TopologyFile};
