//! Ledger creation and lookup.
//!
//! Creation requests are validated before anything is stored; a rejected
//! request leaves no trace. Opening checks the caller's digest type and
//! password against what the ledger was created with.

use std::sync::atomic::{AtomicI64, Ordering};

use tracing::{debug, info, warn};

use crate::digest::DigestType;
use crate::entry::LedgerEntry;
use crate::error::{LedgerError, Result};
use crate::metadata::{LedgerId, LedgerMetadata, LedgerState};
use crate::request::CreateLedgerRequest;
use crate::store::{InMemoryMetadataStore, MetadataStore};

/// Creates, opens, closes and deletes ledgers, and appends to open ones.
///
/// # Example
///
/// ```rust
/// use ledger::{CreateLedgerRequest, DigestType, LedgerRegistry};
///
/// let registry = LedgerRegistry::new();
/// let created = registry
///     .create_ledger(CreateLedgerRequest::new(3, 2, 1, DigestType::Mac, b"secret".to_vec()))
///     .unwrap();
/// let opened = registry.open_ledger(created.id(), DigestType::Mac, b"secret").unwrap();
/// assert_eq!(opened.ensemble_size(), 3);
/// ```
#[derive(Debug)]
pub struct LedgerRegistry<S: MetadataStore = InMemoryMetadataStore> {
    store: S,
    next_id: AtomicI64,
}

impl LedgerRegistry<InMemoryMetadataStore> {
    pub fn new() -> Self {
        Self::with_store(InMemoryMetadataStore::new())
    }
}

impl Default for LedgerRegistry<InMemoryMetadataStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MetadataStore> LedgerRegistry<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            next_id: AtomicI64::new(0),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate `request` and record a new open ledger.
    ///
    /// # Errors
    ///
    /// A validation error if the sizes are not
    /// `ensemble >= write_quorum >= ack_quorum >= 0`.
    pub fn create_ledger(&self, request: CreateLedgerRequest) -> Result<LedgerMetadata> {
        if let Err(err) = request.validate() {
            warn!(
                ensemble = request.ensemble_size,
                write_quorum = request.write_quorum_size,
                ack_quorum = request.ack_quorum_size,
                error = %err,
                "rejecting ledger creation"
            );
            return Err(err);
        }

        let id = LedgerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        // validate() guarantees all three are non-negative.
        let metadata = LedgerMetadata {
            id,
            ensemble_size: request.ensemble_size.unsigned_abs(),
            write_quorum_size: request.write_quorum_size.unsigned_abs(),
            ack_quorum_size: request.ack_quorum_size.unsigned_abs(),
            digest_type: request.digest_type,
            password: request.password,
            custom_metadata: request.custom_metadata.unwrap_or_default(),
            state: LedgerState::Open,
        };
        self.store.create(metadata.clone())?;

        info!(
            ledger = %id,
            ensemble = metadata.ensemble_size,
            write_quorum = metadata.write_quorum_size,
            ack_quorum = metadata.ack_quorum_size,
            digest = %metadata.digest_type,
            "created ledger"
        );
        Ok(metadata)
    }

    /// Open an existing ledger.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NoSuchLedger`] if `id` was never created or was deleted.
    /// - [`LedgerError::DigestMismatch`] if `digest_type` differs.
    /// - [`LedgerError::Unauthorized`] if `password` differs.
    pub fn open_ledger(
        &self,
        id: LedgerId,
        digest_type: DigestType,
        password: &[u8],
    ) -> Result<LedgerMetadata> {
        let metadata = self.store.read(id)?;
        if metadata.digest_type != digest_type {
            warn!(ledger = %id, expected = %metadata.digest_type, got = %digest_type, "digest mismatch");
            return Err(LedgerError::DigestMismatch(id));
        }
        if metadata.password != password {
            warn!(ledger = %id, "bad password");
            return Err(LedgerError::Unauthorized(id));
        }
        debug!(ledger = %id, "opened ledger");
        Ok(metadata)
    }

    /// Mark a ledger closed. Closing twice fails with `LedgerClosed`.
    pub fn close_ledger(&self, id: LedgerId) -> Result<LedgerMetadata> {
        let mut metadata = self.store.read(id)?;
        if metadata.is_closed() {
            return Err(LedgerError::LedgerClosed(id));
        }
        metadata.state = LedgerState::Closed;
        self.store.write(metadata.clone())?;
        info!(ledger = %id, "closed ledger");
        Ok(metadata)
    }

    /// Append `data` to an open ledger and return the new entry id.
    ///
    /// # Errors
    ///
    /// [`LedgerError::LedgerClosed`] once the ledger is closed.
    pub fn add_entry(&self, id: LedgerId, data: impl Into<Vec<u8>>) -> Result<u64> {
        let entry_id = self.store.append_entry(id, data.into())?;
        debug!(ledger = %id, entry = entry_id, "added entry");
        Ok(entry_id)
    }

    /// The most recently appended entry, open or closed.
    pub fn read_last_entry(&self, id: LedgerId) -> Result<LedgerEntry> {
        self.store.read_last_entry(id)
    }

    pub fn delete_ledger(&self, id: LedgerId) -> Result<()> {
        self.store.remove(id)?;
        info!(ledger = %id, "deleted ledger");
        Ok(())
    }

    pub fn ledger_count(&self) -> usize {
        self.store.len()
    }
}
