//! # washer-core: Business Logic for the Washer Company
//!
//! Catalogue, customers, purchases and identifier issuance for a washer
//! retailer. Everything here is in-memory; reading and writing snapshots to
//! disk lives in `washer-store`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Washer Company Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Interaction shell (menu, prompts)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Company::*                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ washer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ catalogue │  │ registry  │  │  ledger   │  │identifier │  │   │
//! │  │   │  Washer   │  │ Customer  │  │ LedgerEnt │  │  Issuer   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                        ▲ owned by Company                       │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO NETWORK • NO STDOUT                             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Snapshot                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 washer-store (Persistence Layer)                │   │
//! │  │           JSON snapshot file, config, seed binary               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`company`] - The facade every caller goes through
//! - [`catalogue`] - Washers keyed by (brand, model)
//! - [`registry`] - Customers keyed by identifier
//! - [`ledger`] - Stocking order and purchase history
//! - [`identifier`] - Customer identifier issuance
//! - [`snapshot`] - Versioned persisted form
//! - [`types`] - Washer, Customer, PurchaseRecord
//! - [`money`] - Integer-cent money
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use washer_core::{Company, InventoryOutcome, Money};
//!
//! let mut company = Company::new();
//! company.add_washer("Acme", "X100", Money::from_major_minor(499, 99)).unwrap();
//! assert_eq!(company.add_inventory("Acme", "X100", 10), InventoryOutcome::OperationCompleted);
//!
//! let jane = company.add_customer("Jane Doe", "555-1212");
//! assert_eq!(jane.id.to_string(), "1");
//!
//! let washer = company.purchase_washer("1", "Acme", "X100", 3).unwrap();
//! assert_eq!(washer.quantity, 7);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalogue;
pub mod company;
pub mod error;
pub mod identifier;
pub mod ledger;
pub mod money;
pub mod registry;
pub mod snapshot;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalogue::Catalogue;
pub use company::{Company, InventoryOutcome};
pub use error::{CoreError, CoreResult, ValidationError};
pub use identifier::IdentifierIssuer;
pub use ledger::{LedgerEntry, PurchaseLedger, SalesSummary};
pub use money::Money;
pub use registry::CustomerRegistry;
pub use snapshot::{Snapshot, SnapshotHeader, SNAPSHOT_SCHEMA_VERSION};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a brand or model label, in characters.
pub const MAX_LABEL_LEN: usize = 100;

/// Highest accepted washer price ($10,000,000.00).
pub const MAX_PRICE: Money = Money::from_cents(1_000_000_000);
