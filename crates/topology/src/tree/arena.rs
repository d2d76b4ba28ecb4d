//! Index-addressed storage for tree nodes.
//!
//! Parent and child links are indices into the arena, so the tree has no
//! reference cycles and no node outlives its slot.

use crate::location;
use crate::node::{Node, NodeKind};

/// Stable index of a node record within an [`Arena`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeIdx(usize);

/// A node as stored inside the tree.
#[derive(Debug)]
pub(crate) struct Record {
    pub kind: NodeKind,
    pub name: String,
    pub location: String,
    pub parent: Option<NodeIdx>,
    /// Children in insertion order. Always empty for leaves.
    pub children: Vec<NodeIdx>,
    /// Leaves at or below this node.
    pub leaf_count: usize,
}

impl Record {
    pub fn path(&self) -> String {
        if self.parent.is_none() {
            return location::ROOT.to_string();
        }
        location::join(&self.location, &self.name)
    }

    pub fn to_node(&self) -> Node {
        Node::with_kind(self.kind, self.name.clone(), &self.location)
    }
}

/// Slot storage with free-list reuse.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    slots: Vec<Option<Record>>,
    free: Vec<usize>,
}

impl Arena {
    pub fn insert(&mut self, record: Record) -> NodeIdx {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(record);
                NodeIdx(slot)
            }
            None => {
                self.slots.push(Some(record));
                NodeIdx(self.slots.len() - 1)
            }
        }
    }

    pub fn release(&mut self, idx: NodeIdx) -> Option<Record> {
        let record = self.slots.get_mut(idx.0)?.take()?;
        self.free.push(idx.0);
        Some(record)
    }

    /// Panics on a released index; indices never escape the tree's lock.
    pub fn get(&self, idx: NodeIdx) -> &Record {
        self.slots[idx.0].as_ref().expect("live arena index")
    }

    pub fn get_mut(&mut self, idx: NodeIdx) -> &mut Record {
        self.slots[idx.0].as_mut().expect("live arena index")
    }

    /// Child of `parent` named `name`, if any.
    pub fn child(&self, parent: NodeIdx, name: &str) -> Option<NodeIdx> {
        self.get(parent)
            .children
            .iter()
            .copied()
            .find(|&c| self.get(c).name == name)
    }

    /// Ancestors of `idx` from the root down to its parent.
    pub fn ancestors(&self, idx: NodeIdx) -> Vec<NodeIdx> {
        let mut chain = Vec::new();
        let mut cur = self.get(idx).parent;
        while let Some(p) = cur {
            chain.push(p);
            cur = self.get(p).parent;
        }
        chain.reverse();
        chain
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
