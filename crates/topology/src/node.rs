//! Node abstractions for the network topology.
//!
//! A [`Node`] is a position in the rack hierarchy. Leaves are storage
//! endpoints (bookies); inner nodes are racks or higher aggregation levels
//! and only ever exist inside a [`NetworkTopology`](crate::NetworkTopology).

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::location;

/// Variant tag of a node.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum NodeKind {
    /// A storage endpoint. Cannot have children.
    Leaf,
    /// A rack, datacenter or other aggregation point.
    Inner,
}

/// A node in the topology, identified by its name and network location.
///
/// Two nodes are equal iff they share name and location, regardless of how
/// they were constructed. This is the identity the tree uses for lookups.
///
/// Parent links are not stored on the value; ask the owning topology via
/// [`NetworkTopology::parent_of`](crate::NetworkTopology::parent_of).
#[derive(Clone, Debug)]
pub struct Node {
    kind: NodeKind,
    /// Stable identifier, typically `host:port`.
    name: String,
    /// Path of the immediate parent, e.g. `/root/rack1`.
    location: String,
}

impl Node {
    /// Construct a leaf (storage endpoint) at `location`.
    pub fn leaf(name: impl Into<String>, location: impl AsRef<str>) -> Self {
        Self::with_kind(NodeKind::Leaf, name, location)
    }

    /// Construct an inner node description.
    ///
    /// Inner nodes are created by the tree itself; handing one to
    /// `add`/`remove` is rejected.
    pub fn inner(name: impl Into<String>, location: impl AsRef<str>) -> Self {
        Self::with_kind(NodeKind::Inner, name, location)
    }

    /// Construct a leaf from its full path, e.g. `/dc1/rack1/10.0.0.1:3181`.
    pub fn from_path(path: &str) -> Self {
        let (location, name) = location::split(path);
        Self::leaf(name, location)
    }

    pub(crate) fn with_kind(kind: NodeKind, name: impl Into<String>, location: impl AsRef<str>) -> Self {
        Self {
            kind,
            name: name.into(),
            location: location::normalize(location.as_ref()),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn network_location(&self) -> &str {
        &self.location
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    /// Full path of this node: its location joined with its name.
    pub fn path(&self) -> String {
        location::join(&self.location, &self.name)
    }

    /// Number of levels between the root and this node.
    pub fn level(&self) -> usize {
        location::depth(&self.location) + 1
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.location == other.location
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.location.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
