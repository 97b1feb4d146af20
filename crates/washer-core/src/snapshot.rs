//! # Snapshot Schema
//!
//! The versioned encode/decode contract for persisted company state.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Snapshot                                                               │
//! │  ├── schema_version   ← read first, gates decoding                     │
//! │  ├── saved_at                                                           │
//! │  ├── company          ← blob 1: catalogue, customers, ledger           │
//! │  └── identifiers      ← blob 2: issuer counter                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both blobs are produced by one [`Company::snapshot`](crate::Company::snapshot)
//! call and written in one save, so they can never drift apart.
//!
//! ## Evolving the Schema
//! 1. Bump [`SNAPSHOT_SCHEMA_VERSION`]
//! 2. New fields get `#[serde(default)]` so older snapshots still decode
//! 3. **NEVER** rename or drop a field without a version bump

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ledger::PurchaseLedger;
use crate::types::{Customer, Washer};

/// Schema version written by this build.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Complete persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    pub company: CompanyState,
    pub identifiers: IdentifierState,
}

/// Catalogue, registry and ledger contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyState {
    #[serde(default)]
    pub catalogue: Vec<Washer>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub ledger: PurchaseLedger,
}

/// Identifier issuer counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierState {
    /// Next identifier to issue.
    pub next_id: u64,
}

/// Just enough of a snapshot to decide how to decode the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SnapshotHeader {
    pub schema_version: u32,
}

impl SnapshotHeader {
    /// Checks whether this build can decode the snapshot.
    pub fn is_supported(&self) -> bool {
        self.schema_version >= 1 && self.schema_version <= SNAPSHOT_SCHEMA_VERSION
    }
}
