//! Ledger metadata storage.
//!
//! The registry talks to storage through [`MetadataStore`] so the backing
//! store can be swapped; [`InMemoryMetadataStore`] is the process-local one.

pub mod memory;

pub use memory::InMemoryMetadataStore;

use crate::entry::LedgerEntry;
use crate::error::Result;
use crate::metadata::{LedgerId, LedgerMetadata};

/// Storage for ledger metadata.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the registry calls them from any
/// thread without external locking.
pub trait MetadataStore: Send + Sync + 'static {
    /// Store metadata for a new ledger. Fails with `LedgerExists` if the id
    /// is taken.
    fn create(&self, metadata: LedgerMetadata) -> Result<()>;

    /// Fails with `NoSuchLedger` if absent.
    fn read(&self, id: LedgerId) -> Result<LedgerMetadata>;

    /// Replace the metadata of an existing ledger.
    fn write(&self, metadata: LedgerMetadata) -> Result<()>;

    /// Fails with `NoSuchLedger` if absent. Drops the ledger's entries too.
    fn remove(&self, id: LedgerId) -> Result<()>;

    /// Append an entry and return its id. Fails with `LedgerClosed` once
    /// the ledger is closed.
    fn append_entry(&self, id: LedgerId, data: Vec<u8>) -> Result<u64>;

    /// Fails with `NoEntries` if nothing was appended yet.
    fn read_last_entry(&self, id: LedgerId) -> Result<LedgerEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
