//! Integration tests for ledger creation and lookup.
//!
//! # Test Strategy
//!
//! 1. **Creation**: valid parameter sets echo back exactly
//! 2. **Validation**: invalid parameter sets create nothing
//! 3. **Open**: password, digest and existence checks
//! 4. **Entries**: append, close, reopen and read back
//! 5. **Properties**: validity rule over arbitrary sizes

use std::collections::HashMap;

use ledger::{CreateLedgerRequest, DigestType, LedgerError, LedgerId, LedgerRegistry, MetadataStore};
use proptest::prelude::*;

fn custom_metadata() -> HashMap<String, Vec<u8>> {
    HashMap::from([("myMetadata".to_string(), b"MyCustomMetadata".to_vec())])
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_create_echoes_parameters() {
    let registry = LedgerRegistry::new();
    let request = CreateLedgerRequest::new(3, 2, 1, DigestType::Mac, vec![0u8; 6])
        .with_custom_metadata(custom_metadata());

    let metadata = registry.create_ledger(request).unwrap();

    assert_eq!(metadata.ensemble_size(), 3);
    assert_eq!(metadata.write_quorum_size(), 2);
    assert_eq!(metadata.ack_quorum_size(), 1);
    assert_eq!(metadata.digest_type(), DigestType::Mac);
    assert_eq!(metadata.password(), &[0u8; 6]);
    assert_eq!(metadata.custom_metadata(), &custom_metadata());
    assert!(!metadata.is_closed());
}

#[test]
fn test_create_valid_parameter_sets() {
    let registry = LedgerRegistry::new();
    let cases: Vec<(i32, i32, i32, DigestType, Vec<u8>, Option<HashMap<String, Vec<u8>>>)> = vec![
        (3, 2, 1, DigestType::Mac, vec![0; 6], Some(custom_metadata())),
        (2, 2, 1, DigestType::Crc32, vec![0; 6], None),
        (2, 1, 1, DigestType::Mac, vec![0; 6], None),
        (1, 1, 1, DigestType::Crc32, vec![], Some(HashMap::new())),
        (2, 1, 0, DigestType::Dummy, vec![], Some(HashMap::new())),
        (1, 1, 0, DigestType::Mac, vec![0; 6], None),
        (1, 0, 0, DigestType::Mac, vec![0; 6], None),
        (0, 0, 0, DigestType::Dummy, vec![0; 6], Some(custom_metadata())),
    ];

    for (e, w, a, digest, password, custom) in cases {
        let mut request = CreateLedgerRequest::new(e, w, a, digest, password.clone());
        request.custom_metadata = custom.clone();

        let metadata = registry.create_ledger(request).unwrap();
        assert_eq!(
            (metadata.ensemble_size(), metadata.write_quorum_size(), metadata.ack_quorum_size()),
            (e as u32, w as u32, a as u32)
        );
        assert_eq!(metadata.password(), password.as_slice());
        assert_eq!(metadata.custom_metadata(), &custom.unwrap_or_default());
    }
    assert_eq!(registry.ledger_count(), 8);
}

#[test]
fn test_ledger_ids_are_distinct() {
    let registry = LedgerRegistry::new();
    let a = registry
        .create_ledger(CreateLedgerRequest::with_defaults(DigestType::Crc32, "p"))
        .unwrap();
    let b = registry
        .create_ledger(CreateLedgerRequest::with_defaults(DigestType::Crc32, "p"))
        .unwrap();
    assert_ne!(a.id(), b.id());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_quorum_exceeding_ensemble_rejected() {
    let registry = LedgerRegistry::new();
    let err = registry
        .create_ledger(CreateLedgerRequest::new(1, 2, 1, DigestType::Mac, vec![0u8; 6]))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(registry.ledger_count(), 0);
}

#[test]
fn test_invalid_parameter_sets_create_nothing() {
    let registry = LedgerRegistry::new();
    let cases = [
        (1, 0, 1, DigestType::Mac),
        (0, 0, 1, DigestType::Crc32),
        (0, -1, 0, DigestType::Dummy),
        (-1, -1, 0, DigestType::Crc32c),
        (-1, -1, -1, DigestType::Mac),
        (-1, -2, -1, DigestType::Mac),
        (-2, -2, -1, DigestType::Mac),
        (1, 0, -1, DigestType::Mac),
        (0, 0, -1, DigestType::Crc32c),
        (0, -1, -1, DigestType::Mac),
    ];
    for (e, w, a, digest) in cases {
        let result = registry.create_ledger(CreateLedgerRequest::new(e, w, a, digest, vec![0u8; 6]));
        assert!(result.is_err(), "({}, {}, {}) should be rejected", e, w, a);
    }
    assert!(registry.store().is_empty());
}

// ============================================================================
// Open / Close / Delete
// ============================================================================

#[test]
fn test_open_with_matching_credentials() {
    let registry = LedgerRegistry::new();
    for (digest, password) in [(DigestType::Mac, b"test_pwd".to_vec()), (DigestType::Crc32, vec![])] {
        let created = registry
            .create_ledger(CreateLedgerRequest::with_defaults(digest, password.clone()))
            .unwrap();
        let opened = registry.open_ledger(created.id(), digest, &password).unwrap();
        assert_eq!(opened, created);
    }
}

#[test]
fn test_open_with_bad_password() {
    let registry = LedgerRegistry::new();
    for (digest, password) in [(DigestType::Crc32c, b"test_pwd".to_vec()), (DigestType::Mac, vec![])] {
        let created = registry
            .create_ledger(CreateLedgerRequest::with_defaults(digest, "bad_pwd"))
            .unwrap();
        let err = registry.open_ledger(created.id(), digest, &password).unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized(created.id()));
    }
}

#[test]
fn test_open_non_existent() {
    let registry = LedgerRegistry::new();
    let err = registry
        .open_ledger(LedgerId(-1), DigestType::Mac, b"test_pwd")
        .unwrap_err();
    assert_eq!(err, LedgerError::NoSuchLedger(LedgerId(-1)));
}

#[test]
fn test_open_with_other_digest() {
    let registry = LedgerRegistry::new();
    let created = registry
        .create_ledger(CreateLedgerRequest::with_defaults(DigestType::Mac, "pwd"))
        .unwrap();
    let err = registry
        .open_ledger(created.id(), DigestType::Crc32, b"pwd")
        .unwrap_err();
    assert_eq!(err, LedgerError::DigestMismatch(created.id()));
}

#[test]
fn test_close_and_delete() {
    let registry = LedgerRegistry::new();
    let id = registry
        .create_ledger(CreateLedgerRequest::with_defaults(DigestType::Dummy, ""))
        .unwrap()
        .id();

    assert!(registry.close_ledger(id).unwrap().is_closed());
    assert_eq!(registry.close_ledger(id).unwrap_err(), LedgerError::LedgerClosed(id));

    registry.delete_ledger(id).unwrap();
    assert_eq!(registry.delete_ledger(id).unwrap_err(), LedgerError::NoSuchLedger(id));
    assert!(registry.open_ledger(id, DigestType::Dummy, b"").is_err());
}

// ============================================================================
// Entries
// ============================================================================

#[test]
fn test_entry_survives_close_and_reopen() {
    let registry = LedgerRegistry::new();
    for (digest, password) in [(DigestType::Mac, b"test_pwd".to_vec()), (DigestType::Crc32, vec![])] {
        let id = registry
            .create_ledger(CreateLedgerRequest::with_defaults(digest, password.clone()))
            .unwrap()
            .id();
        let value = "test_pwd".as_bytes().to_vec();

        assert_eq!(registry.add_entry(id, value.clone()).unwrap(), 0);
        registry.close_ledger(id).unwrap();

        let opened = registry.open_ledger(id, digest, &password).unwrap();
        let last = registry.read_last_entry(opened.id()).unwrap();
        assert_eq!(last.data(), value.as_slice());
        assert_eq!(last.entry_id(), 0);
        assert_eq!(last.ledger_id(), id);
    }
}

#[test]
fn test_closed_ledger_rejects_entries() {
    let registry = LedgerRegistry::new();
    let id = registry
        .create_ledger(CreateLedgerRequest::with_defaults(DigestType::Crc32c, "pwd"))
        .unwrap()
        .id();
    assert_eq!(registry.add_entry(id, "a").unwrap(), 0);
    assert_eq!(registry.add_entry(id, "b").unwrap(), 1);

    registry.close_ledger(id).unwrap();
    assert_eq!(registry.add_entry(id, "c").unwrap_err(), LedgerError::LedgerClosed(id));
    assert_eq!(registry.read_last_entry(id).unwrap().into_data(), b"b".to_vec());
}

#[test]
fn test_read_last_entry_errors() {
    let registry = LedgerRegistry::new();
    let id = registry
        .create_ledger(CreateLedgerRequest::with_defaults(DigestType::Dummy, ""))
        .unwrap()
        .id();
    assert_eq!(registry.read_last_entry(id).unwrap_err(), LedgerError::NoEntries(id));
    assert_eq!(
        registry.add_entry(LedgerId(-1), "x").unwrap_err(),
        LedgerError::NoSuchLedger(LedgerId(-1))
    );

    registry.add_entry(id, "x").unwrap();
    registry.delete_ledger(id).unwrap();
    assert_eq!(registry.read_last_entry(id).unwrap_err(), LedgerError::NoSuchLedger(id));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn validity_matches_ordering(e in -3i32..6, w in -3i32..6, a in -3i32..6) {
        let registry = LedgerRegistry::new();
        let result = registry.create_ledger(CreateLedgerRequest::new(e, w, a, DigestType::Crc32, vec![1, 2, 3]));
        let expected = e >= w && w >= a && a >= 0;
        prop_assert_eq!(result.is_ok(), expected);
        prop_assert_eq!(registry.ledger_count(), usize::from(expected));
    }
}
