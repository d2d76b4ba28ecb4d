//! Ledger creation contract.
//!
//! This crate provides:
//! - Digest types for ledger entries
//! - Creation requests and ensemble/quorum validation
//! - Ledger metadata echoing the creation parameters
//! - A registry to create, open, close and delete ledgers
//! - Appending and reading back entries of open ledgers

pub mod digest;
pub mod entry;
pub mod error;
pub mod metadata;
pub mod registry;
pub mod request;
pub mod store;

pub use digest::DigestType;
pub use entry::LedgerEntry;
pub use error::{LedgerError, Result};
pub use metadata::{LedgerId, LedgerMetadata, LedgerState};
pub use registry::LedgerRegistry;
pub use request::CreateLedgerRequest;
pub use store::{InMemoryMetadataStore, MetadataStore};
