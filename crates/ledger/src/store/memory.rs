//! In-memory metadata store backed by a concurrent map.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::entry::LedgerEntry;
use crate::error::{LedgerError, Result};
use crate::metadata::{LedgerId, LedgerMetadata};
use crate::store::MetadataStore;

#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    ledgers: DashMap<LedgerId, LedgerMetadata>,
    entries: DashMap<LedgerId, Vec<Vec<u8>>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn create(&self, metadata: LedgerMetadata) -> Result<()> {
        match self.ledgers.entry(metadata.id) {
            Entry::Occupied(_) => Err(LedgerError::LedgerExists(metadata.id)),
            Entry::Vacant(slot) => {
                slot.insert(metadata);
                Ok(())
            }
        }
    }

    fn read(&self, id: LedgerId) -> Result<LedgerMetadata> {
        self.ledgers
            .get(&id)
            .map(|m| m.value().clone())
            .ok_or(LedgerError::NoSuchLedger(id))
    }

    fn write(&self, metadata: LedgerMetadata) -> Result<()> {
        match self.ledgers.get_mut(&metadata.id) {
            Some(mut existing) => {
                *existing = metadata;
                Ok(())
            }
            None => Err(LedgerError::NoSuchLedger(metadata.id)),
        }
    }

    fn remove(&self, id: LedgerId) -> Result<()> {
        self.ledgers
            .remove(&id)
            .ok_or(LedgerError::NoSuchLedger(id))?;
        self.entries.remove(&id);
        Ok(())
    }

    fn append_entry(&self, id: LedgerId, data: Vec<u8>) -> Result<u64> {
        // The metadata guard stays held across the append; close waits on it.
        let metadata = self.ledgers.get(&id).ok_or(LedgerError::NoSuchLedger(id))?;
        if metadata.is_closed() {
            return Err(LedgerError::LedgerClosed(id));
        }
        let mut entries = self.entries.entry(id).or_default();
        entries.push(data);
        Ok(entries.len() as u64 - 1)
    }

    fn read_last_entry(&self, id: LedgerId) -> Result<LedgerEntry> {
        if !self.ledgers.contains_key(&id) {
            return Err(LedgerError::NoSuchLedger(id));
        }
        let entries = self.entries.get(&id).ok_or(LedgerError::NoEntries(id))?;
        let data = entries.last().ok_or(LedgerError::NoEntries(id))?;
        Ok(LedgerEntry {
            ledger_id: id,
            entry_id: entries.len() as u64 - 1,
            data: data.clone(),
        })
    }

    fn len(&self) -> usize {
        self.ledgers.len()
    }
}
