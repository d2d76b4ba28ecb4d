//! Digest types applied to ledger entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Integrity-checking scheme for a ledger's entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DigestType {
    Mac,
    Crc32,
    Crc32c,
    Dummy,
}

impl DigestType {
    pub const ALL: [DigestType; 4] = [
        DigestType::Mac,
        DigestType::Crc32,
        DigestType::Crc32c,
        DigestType::Dummy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DigestType::Mac => "MAC",
            DigestType::Crc32 => "CRC32",
            DigestType::Crc32c => "CRC32C",
            DigestType::Dummy => "DUMMY",
        }
    }
}

impl fmt::Display for DigestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DigestType::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| LedgerError::UnknownDigestType(s.to_string()))
    }
}
