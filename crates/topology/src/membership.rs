//! Applying cluster-membership events to a topology.
//!
//! The membership source emits join/leave events; a [`MembershipWatcher`]
//! drains them on a dedicated thread and applies each one exactly once.
//! Duplicate deliveries are harmless because `add` and `remove` are
//! idempotent.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::Receiver;
use tracing::{debug, warn};

use crate::error::Result;
use crate::node::Node;
use crate::tree::NetworkTopology;

/// A change in cluster membership.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MembershipEvent {
    /// A bookie registered at its rack.
    Joined(Node),
    /// A bookie went away.
    Left(Node),
}

impl MembershipEvent {
    pub fn node(&self) -> &Node {
        match self {
            MembershipEvent::Joined(node) | MembershipEvent::Left(node) => node,
        }
    }
}

/// Apply a single event to `topology`.
pub fn apply_event(topology: &NetworkTopology, event: &MembershipEvent) -> Result<()> {
    match event {
        MembershipEvent::Joined(node) => topology.add(node),
        MembershipEvent::Left(node) => topology.remove(node),
    }
}

/// Counters reported when a watcher shuts down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WatcherStats {
    pub applied: u64,
    pub rejected: u64,
}

/// Background consumer of membership events.
///
/// Runs until every sender of the channel has been dropped.
#[derive(Debug)]
pub struct MembershipWatcher {
    handle: JoinHandle<WatcherStats>,
}

impl MembershipWatcher {
    pub fn spawn(topology: Arc<NetworkTopology>, events: Receiver<MembershipEvent>) -> Self {
        let handle = thread::spawn(move || {
            let mut stats = WatcherStats::default();
            for event in events.iter() {
                match apply_event(&topology, &event) {
                    Ok(()) => stats.applied += 1,
                    Err(err) => {
                        // A bad registration must not stop the watcher.
                        warn!(node = %event.node(), error = %err, "membership event rejected");
                        stats.rejected += 1;
                    }
                }
            }
            debug!(applied = stats.applied, rejected = stats.rejected, "membership channel closed");
            stats
        });
        Self { handle }
    }

    /// Wait for the channel to close and return the final counters.
    pub fn join(self) -> WatcherStats {
        match self.handle.join() {
            Ok(stats) => stats,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::unbounded;

    #[test]
    fn test_apply_event() {
        let topology = NetworkTopology::new();
        let node = Node::leaf("h1", "/r1");
        apply_event(&topology, &MembershipEvent::Joined(node.clone())).unwrap();
        assert!(topology.contains(&node));
        apply_event(&topology, &MembershipEvent::Left(node.clone())).unwrap();
        assert!(!topology.contains(&node));
    }

    #[test]
    fn test_watcher_counts_rejections() {
        let topology = Arc::new(NetworkTopology::new());
        let (tx, rx) = unbounded();
        let watcher = MembershipWatcher::spawn(Arc::clone(&topology), rx);

        tx.send(MembershipEvent::Joined(Node::leaf("h1", "/dc1/r1"))).unwrap();
        tx.send(MembershipEvent::Joined(Node::leaf("h1", "/dc1/r1"))).unwrap();
        tx.send(MembershipEvent::Joined(Node::inner("r9", "/dc1"))).unwrap();
        tx.send(MembershipEvent::Joined(Node::leaf("h2", "/dc1"))).unwrap();
        drop(tx);

        let stats = watcher.join();
        assert_eq!(stats, WatcherStats { applied: 2, rejected: 2 });
        assert_eq!(topology.leaf_count(), 1);
    }
}
