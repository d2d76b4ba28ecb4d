//! Error types for ledger creation and lookup.

use thiserror::Error;

use crate::metadata::LedgerId;

/// Result type alias for the ledger crate.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors returned by the ledger registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Ensemble size below zero.
    #[error("invalid ensemble size {0}")]
    InvalidEnsembleSize(i32),

    /// Write quorum below zero or larger than the ensemble.
    #[error("invalid write quorum {write_quorum} for ensemble of {ensemble}")]
    InvalidWriteQuorum { write_quorum: i32, ensemble: i32 },

    /// Ack quorum below zero or larger than the write quorum.
    #[error("invalid ack quorum {ack_quorum} for write quorum of {write_quorum}")]
    InvalidAckQuorum { ack_quorum: i32, write_quorum: i32 },

    #[error("no such ledger: {0}")]
    NoSuchLedger(LedgerId),

    #[error("ledger already exists: {0}")]
    LedgerExists(LedgerId),

    /// Password does not match the one the ledger was created with.
    #[error("unauthorized access to ledger {0}")]
    Unauthorized(LedgerId),

    #[error("digest type mismatch for ledger {0}")]
    DigestMismatch(LedgerId),

    #[error("ledger {0} is closed")]
    LedgerClosed(LedgerId),

    #[error("ledger {0} has no entries")]
    NoEntries(LedgerId),

    #[error("unknown digest type: {0}")]
    UnknownDigestType(String),
}

impl LedgerError {
    /// True for errors raised by request validation, before any ledger exists.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidEnsembleSize(_)
                | LedgerError::InvalidWriteQuorum { .. }
                | LedgerError::InvalidAckQuorum { .. }
        )
    }
}
