//! # Purchase Ledger
//!
//! Reporting-side companion to the [`Catalogue`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PurchaseLedger                                   │
//! │                                                                         │
//! │  stock_order: [Acme X100, Zeta Z1, Acme X200]   ← listing index        │
//! │        │                                                                │
//! │        └──► resolved against Catalogue at call time                     │
//! │                                                                         │
//! │  entries: [receipt, customer, washer, qty, unit price, when]           │
//! │        │                                                                │
//! │        └──► SalesSummary { purchases, units, revenue }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger never holds washer state itself, so listings always show the
//! quantities currently in the catalogue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalogue::Catalogue;
use crate::money::Money;
use crate::types::{CustomerId, Washer, WasherKey};

/// One completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Same id as the customer's [`PurchaseRecord`](crate::types::PurchaseRecord).
    pub receipt_id: Uuid,
    pub customer_id: CustomerId,
    pub washer: WasherKey,
    pub quantity: u32,
    pub unit_price: Money,
    pub purchased_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// Totals across every recorded purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Number of purchase transactions.
    pub purchases: usize,
    /// Washers sold.
    pub units: u64,
    /// Σ unit price × quantity.
    pub revenue: Money,
}

/// Listing index and purchase history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLedger {
    #[serde(default)]
    stock_order: Vec<WasherKey>,
    #[serde(default)]
    entries: Vec<LedgerEntry>,
}

impl PurchaseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a newly stocked washer to the listing index.
    pub(crate) fn index_washer(&mut self, key: WasherKey) {
        if !self.stock_order.contains(&key) {
            self.stock_order.push(key);
        }
    }

    pub(crate) fn record(&mut self, entry: LedgerEntry) {
        self.entries.push(entry);
    }

    /// Washers in the order they were stocked, read from `catalogue`.
    pub fn washers<'a>(
        &'a self,
        catalogue: &'a Catalogue,
    ) -> impl Iterator<Item = &'a Washer> + Clone + 'a {
        self.stock_order.iter().filter_map(move |key| catalogue.get(key))
    }

    /// Keys in stocking order.
    pub fn stock_order(&self) -> &[WasherKey] {
        &self.stock_order
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Entries for one customer, oldest first.
    pub fn entries_for(&self, customer_id: CustomerId) -> impl Iterator<Item = &LedgerEntry> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.customer_id == customer_id)
    }

    /// Units of one washer sold so far.
    pub fn units_sold(&self, key: &WasherKey) -> u64 {
        self.entries
            .iter()
            .filter(|entry| &entry.washer == key)
            .map(|entry| entry.quantity as u64)
            .sum()
    }

    pub fn summary(&self) -> SalesSummary {
        SalesSummary {
            purchases: self.entries.len(),
            units: self.entries.iter().map(|e| e.quantity as u64).sum(),
            revenue: self.entries.iter().map(LedgerEntry::line_total).sum(),
        }
    }
}
