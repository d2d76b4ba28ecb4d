//! Ledger metadata.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::digest::DigestType;

/// Identifier of a ledger.
///
/// Signed so that lookups of ids that can never be issued (e.g. `-1`)
/// are expressible and fail with `NoSuchLedger`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub struct LedgerId(pub i64);

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub enum LedgerState {
    Open,
    Closed,
}

/// Metadata recorded when a ledger is created.
///
/// Echoes back exactly what the creation request asked for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerMetadata {
    pub(crate) id: LedgerId,
    pub(crate) ensemble_size: u32,
    pub(crate) write_quorum_size: u32,
    pub(crate) ack_quorum_size: u32,
    pub(crate) digest_type: DigestType,
    #[serde(skip)]
    pub(crate) password: Vec<u8>,
    #[serde(skip)]
    pub(crate) custom_metadata: HashMap<String, Vec<u8>>,
    pub(crate) state: LedgerState,
}

impl LedgerMetadata {
    pub fn id(&self) -> LedgerId {
        self.id
    }

    pub fn ensemble_size(&self) -> u32 {
        self.ensemble_size
    }

    pub fn write_quorum_size(&self) -> u32 {
        self.write_quorum_size
    }

    pub fn ack_quorum_size(&self) -> u32 {
        self.ack_quorum_size
    }

    pub fn digest_type(&self) -> DigestType {
        self.digest_type
    }

    pub fn password(&self) -> &[u8] {
        &self.password
    }

    pub fn custom_metadata(&self) -> &HashMap<String, Vec<u8>> {
        &self.custom_metadata
    }

    pub fn state(&self) -> LedgerState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == LedgerState::Closed
    }
}
