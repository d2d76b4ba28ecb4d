//! Read-only placement queries.
//!
//! These are consulted per ledger-creation request by the ensemble
//! selector to spread replicas across racks.

use super::arena::NodeIdx;
use super::{NetworkTopology, TreeState};
use crate::error::{Error, Result};
use crate::location;
use crate::node::{Node, NodeKind};

/// Prefix marking a scope as excluded in [`NetworkTopology::leaves`].
pub const EXCLUDED_SCOPE_PREFIX: char = '~';

impl NetworkTopology {
    /// True if both nodes declare the same rack.
    ///
    /// Compares declared locations, so the nodes need not be members. An
    /// absent node is never on the same rack as anything.
    pub fn is_on_same_rack<'a, 'b>(
        &self,
        a: impl Into<Option<&'a Node>>,
        b: impl Into<Option<&'b Node>>,
    ) -> bool {
        match (a.into(), b.into()) {
            (Some(a), Some(b)) => a.network_location() == b.network_location(),
            _ => false,
        }
    }

    /// Network distance between two nodes.
    ///
    /// Counts the tree edges from each node up to their lowest common
    /// ancestor, weighted by [`TopologyConfig::hop_weight`](crate::TopologyConfig).
    /// With the default weight this is 0 for the same node, 2 within a rack
    /// and 2 more for each level the racks diverge. A node that is not in
    /// the tree sits on its own branch off the root at the leaf depth, so
    /// it is at least as far from a member as any two members are apart.
    ///
    /// # Errors
    ///
    /// [`Error::NullArgument`] if either node is absent.
    pub fn distance<'a, 'b>(
        &self,
        a: impl Into<Option<&'a Node>>,
        b: impl Into<Option<&'b Node>>,
    ) -> Result<u32> {
        let a = a.into().ok_or(Error::NullArgument("distance: first node"))?;
        let b = b.into().ok_or(Error::NullArgument("distance: second node"))?;
        if a == b {
            return Ok(0);
        }

        let state = self.state.read();
        let edges = match (state.find_leaf(a), state.find_leaf(b)) {
            (Some(ia), Some(ib)) => {
                let up_a = state.arena.ancestors(ia);
                let up_b = state.arena.ancestors(ib);
                // Both chains start at the root, so at least one level is shared.
                let shared = up_a.iter().zip(&up_b).take_while(|(x, y)| x == y).count();
                (up_a.len() - shared) + (up_b.len() - shared) + 2
            }
            _ => state.root_depth(a) + state.root_depth(b),
        };

        let edges = u32::try_from(edges).unwrap_or(u32::MAX);
        Ok(edges.saturating_mul(self.config.hop_weight.get()))
    }

    /// The inner node directly above a member leaf.
    pub fn parent_of(&self, node: &Node) -> Option<Node> {
        let state = self.state.read();
        let idx = state.find_leaf(node)?;
        let parent = state.arena.get(idx).parent?;
        Some(state.arena.get(parent).to_node())
    }

    /// Look up a leaf or inner node by its full path.
    ///
    /// The root (`""` or `"/"`) is not returned.
    pub fn get_node(&self, path: &str) -> Option<Node> {
        let path = location::normalize(path);
        let state = self.state.read();
        let mut cur = state.root;
        let mut found = None;
        for component in location::components(&path) {
            cur = state.arena.child(cur, component)?;
            found = Some(cur);
        }
        found.map(|idx| state.arena.get(idx).to_node())
    }

    pub fn leaf_count(&self) -> usize {
        self.state.read().leaves.len()
    }

    /// Number of racks that currently hold at least one leaf.
    pub fn rack_count(&self) -> usize {
        self.state.read().racks
    }

    /// Depth shared by all leaves, or `None` while empty.
    pub fn leaf_depth(&self) -> Option<usize> {
        self.state.read().leaf_depth
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().leaves.is_empty()
    }

    /// Paths of the populated racks, in insertion order.
    pub fn racks(&self) -> Vec<String> {
        let state = self.state.read();
        // Leaves at depth 1 hang directly off the root, which then acts as their rack.
        std::iter::once(state.root)
            .chain(state.preorder())
            .map(|idx| state.arena.get(idx))
            .filter(|r| r.kind == NodeKind::Inner)
            .filter(|r| {
                r.children
                    .iter()
                    .any(|&c| state.arena.get(c).kind == NodeKind::Leaf)
            })
            .map(|r| r.path())
            .collect()
    }

    /// Leaves under `scope`, in insertion order.
    ///
    /// A scope starting with `~` selects every leaf *outside* the rest of
    /// the path. `""` and `"/"` select the whole tree.
    pub fn leaves(&self, scope: &str) -> Vec<Node> {
        let (scope, excluded) = match scope.strip_prefix(EXCLUDED_SCOPE_PREFIX) {
            Some(rest) => (location::normalize(rest), true),
            None => (location::normalize(scope), false),
        };

        let state = self.state.read();
        state
            .preorder()
            .into_iter()
            .map(|idx| state.arena.get(idx))
            .filter(|r| r.kind == NodeKind::Leaf)
            .filter(|r| location::is_within(&r.path(), &scope) != excluded)
            .map(|r| r.to_node())
            .collect()
    }

    /// Leaves selected by `scope` that are not in `excluded`.
    pub fn count_available(&self, scope: &str, excluded: &[Node]) -> usize {
        self.leaves(scope)
            .iter()
            .filter(|n| !excluded.contains(n))
            .count()
    }
}

impl TreeState {
    /// Edges from `node` up to the root.
    ///
    /// Members and non-members alike sit at the shared leaf depth; in an
    /// empty tree a non-member keeps the depth of its declared location.
    fn root_depth(&self, node: &Node) -> usize {
        self.leaf_depth.unwrap_or_else(|| node.level())
    }

    /// Every node below the root, parents before children.
    fn preorder(&self) -> Vec<NodeIdx> {
        let mut out = Vec::with_capacity(self.arena.len());
        let mut stack: Vec<NodeIdx> = self.arena.get(self.root).children.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            out.push(idx);
            stack.extend(self.arena.get(idx).children.iter().rev().copied());
        }
        out
    }
}
