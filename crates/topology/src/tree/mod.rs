//! The network topology tree.
//!
//! # Structure
//!
//! ```text
//! ""                 root (inner)
//! └── root           inner
//!     ├── rack1      inner, one rack
//!     │   ├── h1     leaf
//!     │   └── h2     leaf
//!     └── rack2
//!         └── h3
//! ```
//!
//! Nodes live in an arena and refer to each other by index. A name index
//! maps each leaf's name to its slot so membership checks do not walk the
//! tree.
//!
//! # Invariants
//!
//! - Every leaf sits at the same depth from the root.
//! - Only leaves enter or leave through the public API; inner nodes are
//!   created along a leaf's location on `add` and pruned once empty on
//!   `remove`. The root is never pruned.
//! - The name index holds exactly the leaves reachable from the root.
//!
//! # Thread Safety
//!
//! All state sits behind one `parking_lot::RwLock`. Mutations hold the write
//! lock for their whole duration, so readers never see a leaf detached with
//! its emptied rack still in place.

mod arena;
mod query;

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::TopologyConfig;
use crate::error::{Error, Result};
use crate::location;
use crate::node::{Node, NodeKind};
use arena::{Arena, NodeIdx, Record};

pub use query::EXCLUDED_SCOPE_PREFIX;

/// Hierarchical map of storage nodes and the racks they live on.
///
/// Constructed and owned explicitly; share it between the membership
/// watcher and placement callers with an `Arc`.
///
/// # Example
///
/// ```rust
/// use topology::{NetworkTopology, Node};
///
/// let topology = NetworkTopology::new();
/// let h1 = Node::leaf("10.0.0.1:3181", "/dc1/rack1");
/// let h2 = Node::leaf("10.0.0.2:3181", "/dc1/rack2");
/// topology.add(&h1).unwrap();
/// topology.add(&h2).unwrap();
///
/// assert!(topology.contains(&h1));
/// assert_eq!(topology.distance(&h1, &h2).unwrap(), 4);
/// ```
#[derive(Debug)]
pub struct NetworkTopology {
    config: TopologyConfig,
    state: RwLock<TreeState>,
}

#[derive(Debug)]
struct TreeState {
    arena: Arena,
    root: NodeIdx,
    /// Leaf name -> slot.
    leaves: HashMap<String, NodeIdx>,
    /// Depth shared by every leaf; `None` while the tree is empty.
    leaf_depth: Option<usize>,
    /// Inner nodes that currently hold at least one leaf.
    racks: usize,
}

impl NetworkTopology {
    /// Create an empty topology with default configuration.
    pub fn new() -> Self {
        Self::with_config(TopologyConfig::default())
    }

    pub fn with_config(config: TopologyConfig) -> Self {
        Self {
            config,
            state: RwLock::new(TreeState::new()),
        }
    }

    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    /// Add a leaf to the tree.
    ///
    /// An absent node is ignored. Re-adding a leaf that is already present
    /// changes nothing; adding a known name at a new location moves it.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] for an inner node, a malformed name or
    ///   location, or a location that runs through an existing leaf.
    /// - [`Error::InvalidTopology`] if the leaf's depth differs from the
    ///   depth of the leaves already in the tree.
    ///
    /// On error the tree is left untouched.
    pub fn add<'a>(&self, node: impl Into<Option<&'a Node>>) -> Result<()> {
        let Some(node) = node.into() else {
            debug!("ignoring add of absent node");
            return Ok(());
        };
        ensure_leaf(node, "add")?;
        location::validate_name(node.name())?;
        location::validate(node.network_location())?;

        let mut state = self.state.write();
        state.check_path(node)?;

        let depth = node.level();
        // Moving the sole leaf empties the tree first, so any depth is fine.
        let relocating_sole_leaf = state.leaves.len() == 1 && state.leaves.contains_key(node.name());
        if let Some(expected) = state.leaf_depth.filter(|_| !relocating_sole_leaf) {
            if expected != depth {
                warn!(node = %node, depth, expected, "rejecting leaf at inconsistent depth");
                return Err(Error::InvalidTopology(format!(
                    "failed to add {}: leaf depth {} does not match existing depth {}",
                    node, depth, expected
                )));
            }
        }

        if let Some(&existing) = state.leaves.get(node.name()) {
            let current = state.arena.get(existing).location.clone();
            if current == node.network_location() {
                debug!(node = %node, "leaf already present");
                return Ok(());
            }
            info!(node = %node, from = %current, "relocating leaf");
            state.detach(existing);
        }

        state.attach(node);
        info!(node = %node, leaves = state.leaves.len(), racks = state.racks, "added leaf");
        Ok(())
    }

    /// Remove a leaf from the tree, pruning racks left empty.
    ///
    /// Absent nodes and leaves that are not in the tree are ignored.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `node` is an inner node.
    pub fn remove<'a>(&self, node: impl Into<Option<&'a Node>>) -> Result<()> {
        let Some(node) = node.into() else {
            debug!("ignoring remove of absent node");
            return Ok(());
        };
        ensure_leaf(node, "remove")?;

        let mut state = self.state.write();
        match state.find_leaf(node) {
            Some(idx) => {
                state.detach(idx);
                info!(node = %node, leaves = state.leaves.len(), racks = state.racks, "removed leaf");
            }
            None => debug!(node = %node, "remove of unknown leaf"),
        }
        Ok(())
    }

    /// True iff a leaf with the same name and location is in the tree.
    pub fn contains<'a>(&self, node: impl Into<Option<&'a Node>>) -> bool {
        match node.into() {
            Some(node) => self.state.read().find_leaf(node).is_some(),
            None => false,
        }
    }
}

impl Default for NetworkTopology {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_leaf(node: &Node, op: &str) -> Result<()> {
    match node.kind() {
        NodeKind::Leaf => Ok(()),
        NodeKind::Inner => {
            warn!(node = %node, op, "rejecting inner node");
            Err(Error::InvalidArgument(format!(
                "cannot {} inner node {} directly; only leaves are accepted",
                op, node
            )))
        }
    }
}

impl TreeState {
    fn new() -> Self {
        let mut arena = Arena::default();
        let root = arena.insert(Record {
            kind: NodeKind::Inner,
            name: String::new(),
            location: String::new(),
            parent: None,
            children: Vec::new(),
            leaf_count: 0,
        });
        Self {
            arena,
            root,
            leaves: HashMap::new(),
            leaf_depth: None,
            racks: 0,
        }
    }

    fn find_leaf(&self, node: &Node) -> Option<NodeIdx> {
        let idx = *self.leaves.get(node.name())?;
        (self.arena.get(idx).location == node.network_location()).then_some(idx)
    }

    /// Rejects a location whose existing prefix runs through a leaf.
    fn check_path(&self, node: &Node) -> Result<()> {
        let mut cur = self.root;
        for component in location::components(node.network_location()) {
            let Some(child) = self.arena.child(cur, component) else {
                return Ok(());
            };
            if self.arena.get(child).kind == NodeKind::Leaf {
                return Err(Error::InvalidArgument(format!(
                    "unexpected leaf {} at an illegal network location for {}",
                    self.arena.get(child).path(),
                    node
                )));
            }
            cur = child;
        }
        Ok(())
    }

    /// Inserts `node`, creating inner nodes along its location as needed.
    fn attach(&mut self, node: &Node) {
        let mut cur = self.root;
        for component in location::components(node.network_location()) {
            cur = match self.arena.child(cur, component) {
                Some(child) => child,
                None => {
                    let parent_path = self.arena.get(cur).path();
                    let inner = self.arena.insert(Record {
                        kind: NodeKind::Inner,
                        name: component.to_string(),
                        location: parent_path,
                        parent: Some(cur),
                        children: Vec::new(),
                        leaf_count: 0,
                    });
                    self.arena.get_mut(cur).children.push(inner);
                    inner
                }
            };
        }

        if self.arena.get(cur).children.is_empty() {
            self.racks += 1;
        }
        let leaf = self.arena.insert(Record {
            kind: NodeKind::Leaf,
            name: node.name().to_string(),
            location: node.network_location().to_string(),
            parent: Some(cur),
            children: Vec::new(),
            leaf_count: 1,
        });
        self.arena.get_mut(cur).children.push(leaf);

        let mut up = Some(cur);
        while let Some(idx) = up {
            let record = self.arena.get_mut(idx);
            record.leaf_count += 1;
            up = record.parent;
        }

        self.leaves.insert(node.name().to_string(), leaf);
        self.leaf_depth = Some(node.level());
    }

    /// Unlinks a leaf and prunes ancestors left without children.
    fn detach(&mut self, leaf: NodeIdx) {
        let Some(record) = self.arena.release(leaf) else {
            return;
        };
        self.leaves.remove(&record.name);
        let Some(mut cur) = record.parent else {
            return;
        };

        let parent = self.arena.get_mut(cur);
        parent.children.retain(|&c| c != leaf);
        if parent.children.is_empty() {
            self.racks -= 1;
        }

        let mut up = Some(cur);
        while let Some(idx) = up {
            let record = self.arena.get_mut(idx);
            record.leaf_count -= 1;
            up = record.parent;
        }

        while cur != self.root && self.arena.get(cur).children.is_empty() {
            let Some(parent) = self.arena.release(cur).and_then(|r| r.parent) else {
                break;
            };
            self.arena.get_mut(parent).children.retain(|&c| c != cur);
            cur = parent;
        }

        if self.leaves.is_empty() {
            self.leaf_depth = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_nodes_created_and_pruned() {
        let topology = NetworkTopology::new();
        let h1 = Node::leaf("h1", "/dc1/rack1");
        let h2 = Node::leaf("h2", "/dc1/rack2");
        topology.add(&h1).unwrap();
        topology.add(&h2).unwrap();

        // root, dc1, rack1, rack2, h1, h2
        assert_eq!(topology.state.read().arena.len(), 6);
        assert_eq!(topology.rack_count(), 2);

        topology.remove(&h1).unwrap();
        assert_eq!(topology.state.read().arena.len(), 4);
        assert_eq!(topology.rack_count(), 1);

        topology.remove(&h2).unwrap();
        let state = topology.state.read();
        assert_eq!(state.arena.len(), 1);
        assert!(state.arena.get(state.root).children.is_empty());
        assert_eq!(state.leaf_depth, None);
    }

    #[test]
    fn test_leaf_counts_track_subtrees() {
        let topology = NetworkTopology::new();
        for (name, rack) in [("h1", "/dc1/r1"), ("h2", "/dc1/r1"), ("h3", "/dc1/r2")] {
            topology.add(&Node::leaf(name, rack)).unwrap();
        }
        let state = topology.state.read();
        assert_eq!(state.arena.get(state.root).leaf_count, 3);
        let dc1 = state.arena.child(state.root, "dc1").unwrap();
        let r1 = state.arena.child(dc1, "r1").unwrap();
        assert_eq!(state.arena.get(dc1).leaf_count, 3);
        assert_eq!(state.arena.get(r1).leaf_count, 2);
    }

    #[test]
    fn test_failed_add_leaves_tree_untouched() {
        let topology = NetworkTopology::new();
        topology.add(&Node::leaf("h1", "/dc1/r1")).unwrap();
        let before = topology.state.read().arena.len();

        let err = topology.add(&Node::leaf("h2", "/dc2/r1/deeper")).unwrap_err();
        assert!(matches!(err, Error::InvalidTopology(_)));
        assert_eq!(topology.state.read().arena.len(), before);
        assert_eq!(topology.leaf_count(), 1);
    }

    #[test]
    fn test_relocation_moves_leaf() {
        let topology = NetworkTopology::new();
        let old = Node::leaf("h1", "/dc1/r1");
        let new = Node::leaf("h1", "/dc1/r2");
        topology.add(&old).unwrap();
        topology.add(&new).unwrap();

        assert!(!topology.contains(&old));
        assert!(topology.contains(&new));
        assert_eq!(topology.leaf_count(), 1);
        assert_eq!(topology.racks(), vec!["/dc1/r2".to_string()]);
    }

    #[test]
    fn test_relocating_sole_leaf_to_other_depth() {
        let topology = NetworkTopology::new();
        topology.add(&Node::leaf("h1", "/dc1/r1")).unwrap();
        topology.add(&Node::leaf("h1", "/r1")).unwrap();

        assert!(topology.contains(&Node::leaf("h1", "/r1")));
        assert_eq!(topology.leaf_depth(), Some(2));
        assert_eq!(topology.racks(), vec!["/r1".to_string()]);
        assert_eq!(topology.state.read().arena.len(), 3);
    }

    #[test]
    fn test_relocating_one_of_many_keeps_depth_check() {
        let topology = NetworkTopology::new();
        topology.add(&Node::leaf("h1", "/dc1/r1")).unwrap();
        topology.add(&Node::leaf("h2", "/dc1/r1")).unwrap();

        let err = topology.add(&Node::leaf("h1", "/r1")).unwrap_err();
        assert!(matches!(err, Error::InvalidTopology(_)));
        assert!(topology.contains(&Node::leaf("h1", "/dc1/r1")));
    }
}
