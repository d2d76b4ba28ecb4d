//! CLI subcommands.

use clap::Subcommand;
use ledger::{CreateLedgerRequest, DigestType, LedgerMetadata, LedgerRegistry};
use serde::Serialize;
use topology::{NetworkTopology, Node};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Network distance between two bookies given by full path.
    Distance { a: String, b: String },
    /// Whether two bookies share a rack.
    SameRack { a: String, b: String },
    /// List populated racks.
    Racks,
    /// List bookies under a scope (prefix with `~` to exclude it).
    Leaves {
        #[arg(default_value = "")]
        scope: String,
    },
    /// Check ensemble and quorum sizes for a new ledger.
    ValidateLedger {
        #[arg(allow_negative_numbers = true)]
        ensemble: i32,
        #[arg(allow_negative_numbers = true)]
        write_quorum: i32,
        #[arg(allow_negative_numbers = true)]
        ack_quorum: i32,
        #[arg(long, default_value = "CRC32C")]
        digest: String,
    },
}

/// Output of a command, printed as JSON.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CommandResult {
    Distance { distance: u32 },
    SameRack { same_rack: bool },
    Racks { racks: Vec<String> },
    Leaves { leaves: Vec<String> },
    Ledger {
        valid: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<LedgerMetadata>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl Command {
    pub fn execute(&self, topology: &NetworkTopology) -> anyhow::Result<CommandResult> {
        let result = match self {
            Command::Distance { a, b } => CommandResult::Distance {
                distance: topology.distance(&Node::from_path(a), &Node::from_path(b))?,
            },
            Command::SameRack { a, b } => CommandResult::SameRack {
                same_rack: topology.is_on_same_rack(&Node::from_path(a), &Node::from_path(b)),
            },
            Command::Racks => CommandResult::Racks {
                racks: topology.racks(),
            },
            Command::Leaves { scope } => CommandResult::Leaves {
                leaves: topology.leaves(scope).iter().map(Node::path).collect(),
            },
            Command::ValidateLedger {
                ensemble,
                write_quorum,
                ack_quorum,
                digest,
            } => {
                let digest: DigestType = digest.parse()?;
                let request = CreateLedgerRequest::new(*ensemble, *write_quorum, *ack_quorum, digest, Vec::new());
                match LedgerRegistry::new().create_ledger(request) {
                    Ok(metadata) => CommandResult::Ledger {
                        valid: true,
                        metadata: Some(metadata),
                        error: None,
                    },
                    Err(err) => CommandResult::Ledger {
                        valid: false,
                        metadata: None,
                        error: Some(err.to_string()),
                    },
                }
            }
        };
        Ok(result)
    }
}
