//! Rack-aware network topology for ledger storage nodes.
//!
//! This crate provides:
//! - Node model (leaf bookies and inner racks) and location paths
//! - The topology tree with its structural invariants
//! - Placement queries (distance, same-rack, rack listings)
//! - Application of cluster-membership events

pub mod config;
pub mod error;
pub mod location;
pub mod membership;
pub mod node;
pub mod tree;

pub use config::TopologyConfig;
pub use error::{Error, Result};
pub use membership::{apply_event, MembershipEvent, MembershipWatcher, WatcherStats};
pub use node::{Node, NodeKind};
pub use tree::NetworkTopology;
