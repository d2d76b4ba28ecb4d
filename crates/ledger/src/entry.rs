//! Ledger entries.

use crate::metadata::LedgerId;

/// An entry appended to a ledger. Entry ids start at 0 and are dense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    pub(crate) ledger_id: LedgerId,
    pub(crate) entry_id: u64,
    pub(crate) data: Vec<u8>,
}

impl LedgerEntry {
    pub fn ledger_id(&self) -> LedgerId {
        self.ledger_id
    }

    pub fn entry_id(&self) -> u64 {
        self.entry_id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
