//! Ledger creation requests and their validation.

use std::collections::HashMap;

use crate::digest::DigestType;
use crate::error::{LedgerError, Result};

/// Ensemble size used by [`CreateLedgerRequest::with_defaults`].
pub const DEFAULT_ENSEMBLE_SIZE: i32 = 3;
/// Write quorum used by [`CreateLedgerRequest::with_defaults`].
pub const DEFAULT_WRITE_QUORUM: i32 = 2;
/// Ack quorum used by [`CreateLedgerRequest::with_defaults`].
pub const DEFAULT_ACK_QUORUM: i32 = 2;

/// Parameters for creating a ledger.
///
/// Sizes are signed because they arrive unchecked from callers;
/// [`validate`](Self::validate) rejects anything that is not
/// `ensemble >= write_quorum >= ack_quorum >= 0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateLedgerRequest {
    pub ensemble_size: i32,
    pub write_quorum_size: i32,
    pub ack_quorum_size: i32,
    pub digest_type: DigestType,
    /// May be empty.
    pub password: Vec<u8>,
    /// `None` and an empty map are both accepted.
    pub custom_metadata: Option<HashMap<String, Vec<u8>>>,
}

impl CreateLedgerRequest {
    pub fn new(
        ensemble_size: i32,
        write_quorum_size: i32,
        ack_quorum_size: i32,
        digest_type: DigestType,
        password: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            ensemble_size,
            write_quorum_size,
            ack_quorum_size,
            digest_type,
            password: password.into(),
            custom_metadata: None,
        }
    }

    /// A request with the default 3/2/2 ensemble and quorums.
    pub fn with_defaults(digest_type: DigestType, password: impl Into<Vec<u8>>) -> Self {
        Self::new(
            DEFAULT_ENSEMBLE_SIZE,
            DEFAULT_WRITE_QUORUM,
            DEFAULT_ACK_QUORUM,
            digest_type,
            password,
        )
    }

    pub fn with_custom_metadata(mut self, custom_metadata: HashMap<String, Vec<u8>>) -> Self {
        self.custom_metadata = Some(custom_metadata);
        self
    }

    /// Check the ensemble and quorum sizes.
    ///
    /// # Errors
    ///
    /// The first violated bound, checked ensemble first.
    pub fn validate(&self) -> Result<()> {
        let (ensemble, write_quorum, ack_quorum) =
            (self.ensemble_size, self.write_quorum_size, self.ack_quorum_size);

        if ensemble < 0 {
            return Err(LedgerError::InvalidEnsembleSize(ensemble));
        }
        if write_quorum < 0 || write_quorum > ensemble {
            return Err(LedgerError::InvalidWriteQuorum { write_quorum, ensemble });
        }
        if ack_quorum < 0 || ack_quorum > write_quorum {
            return Err(LedgerError::InvalidAckQuorum { ack_quorum, write_quorum });
        }
        Ok(())
    }
}
