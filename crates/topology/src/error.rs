//! Error types for the topology crate.

use thiserror::Error;

/// Result type alias for the topology crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while mutating or querying the topology.
///
/// All of these are programming or configuration errors on the caller's
/// side. Retrying without fixing the input fails identically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Structurally wrong argument: an inner node passed to `add`/`remove`,
    /// a malformed name or location, or a location running through a leaf.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The leaf would break the uniform-depth invariant of the tree.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A required node argument was absent.
    #[error("null argument: {0}")]
    NullArgument(&'static str),
}
