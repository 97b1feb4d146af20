//! # Company Facade
//!
//! The single entry point the interaction shell talks to.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Company                                      │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────────┐ ┌────────────────┐ ┌──────────┐ │
//! │  │  Catalogue   │ │ CustomerRegistry │ │ PurchaseLedger │ │  Issuer  │ │
//! │  └──────────────┘ └──────────────────┘ └────────────────┘ └──────────┘ │
//! │                                                                         │
//! │  One Company per process, created at startup and passed to the shell.  │
//! │  Every mutating call takes `&mut self`: nothing else can hold a        │
//! │  mutable reference into the components.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purchase Flow
//! ```text
//! purchase_washer("1", "Acme", "X100", 3)
//!      │
//!      ├── customer "1" registered?      no → CustomerNotFound
//!      ├── washer Acme X100 stocked?     no → WasherNotFound
//!      ├── quantity valid?               no → InvalidQuantity
//!      ├── decrement stock               no → InsufficientStock (nothing changed)
//!      ├── append customer history
//!      └── append ledger entry
//! ```

use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalogue::Catalogue;
use crate::error::{CoreError, CoreResult};
use crate::identifier::IdentifierIssuer;
use crate::ledger::{LedgerEntry, PurchaseLedger, SalesSummary};
use crate::money::Money;
use crate::registry::CustomerRegistry;
use crate::snapshot::{
    CompanyState, IdentifierState, Snapshot, SnapshotHeader, SNAPSHOT_SCHEMA_VERSION,
};
use crate::types::{Customer, CustomerId, PurchaseRecord, Washer};
use crate::validation;

// =============================================================================
// Inventory Outcome
// =============================================================================

/// Result of [`Company::add_inventory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryOutcome {
    /// No washer with that brand and model.
    WasherNotFound,
    /// The washer exists but the quantity could not be applied.
    OperationFailed,
    /// Quantity added.
    OperationCompleted,
}

impl fmt::Display for InventoryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryOutcome::WasherNotFound => write!(f, "No such washer in inventory"),
            InventoryOutcome::OperationFailed => write!(f, "Washer quantity could not be updated"),
            InventoryOutcome::OperationCompleted => write!(f, "Washer quantity was updated"),
        }
    }
}

// =============================================================================
// Company
// =============================================================================

/// The washer retailer: catalogue, customers, sales and identifier issuance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Company {
    catalogue: Catalogue,
    customers: CustomerRegistry,
    ledger: PurchaseLedger,
    issuer: IdentifierIssuer,
}

impl Company {
    /// Creates an empty company whose first customer will be `"1"`.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Registers a customer. Always succeeds.
    pub fn add_customer(&mut self, name: &str, phone: &str) -> Customer {
        let customer = self.customers.register(&mut self.issuer, name, phone);
        info!(customer_id = %customer.id, "Customer registered");
        customer
    }

    /// Looks up a customer by the identifier string the shell was given.
    pub fn search_customer(&self, customer_id: &str) -> Option<&Customer> {
        let id = customer_id.parse::<CustomerId>().ok()?;
        self.customers.find(id)
    }

    /// All customers, or `None` when nobody is registered yet.
    pub fn list_customers(&self) -> Option<impl Iterator<Item = &Customer> + Clone + '_> {
        if self.customers.is_empty() {
            return None;
        }
        Some(self.customers.list())
    }

    // =========================================================================
    // Washers
    // =========================================================================

    /// Adds a washer model to the catalogue with nothing on hand.
    ///
    /// ## Returns
    /// * `Ok(Washer)` - The new record (quantity 0)
    /// * `Err(CoreError::Validation)` - Empty/oversized label or negative price
    /// * `Err(CoreError::AlreadyExists)` - Brand and model already stocked
    pub fn add_washer(&mut self, brand: &str, model: &str, price: Money) -> CoreResult<Washer> {
        validation::validate_brand(brand)?;
        validation::validate_model(model)?;
        validation::validate_price(price)?;

        let washer = self.catalogue.stock(brand, model, price)?;
        self.ledger.index_washer(washer.key());

        info!(brand = %brand, model = %model, price = %price, "Washer stocked");
        Ok(washer)
    }

    /// Adds units to an existing washer.
    ///
    /// Negative quantities and additions that overflow the stock counter are
    /// reported as [`InventoryOutcome::OperationFailed`].
    pub fn add_inventory(&mut self, brand: &str, model: &str, quantity: i64) -> InventoryOutcome {
        if self.catalogue.find(brand, model).is_none() {
            debug!(brand = %brand, model = %model, "Inventory add for unknown washer");
            return InventoryOutcome::WasherNotFound;
        }

        let amount = match validation::validate_restock_quantity(quantity) {
            Ok(amount) => amount,
            Err(e) => {
                debug!(quantity, error = %e, "Rejected inventory quantity");
                return InventoryOutcome::OperationFailed;
            }
        };

        match self.catalogue.add_quantity(brand, model, amount) {
            Ok(on_hand) => {
                debug!(brand = %brand, model = %model, added = amount, on_hand, "Inventory added");
                InventoryOutcome::OperationCompleted
            }
            Err(e) => {
                debug!(brand = %brand, model = %model, error = %e, "Inventory add failed");
                InventoryOutcome::OperationFailed
            }
        }
    }

    /// Exact-match washer lookup.
    pub fn find_washer(&self, brand: &str, model: &str) -> Option<&Washer> {
        self.catalogue.find(brand, model)
    }

    /// All washers in stocking order, or `None` when the catalogue is empty.
    pub fn list_washers(&self) -> Option<impl Iterator<Item = &Washer> + Clone + '_> {
        if self.catalogue.is_empty() {
            return None;
        }
        Some(self.ledger.washers(&self.catalogue))
    }

    // =========================================================================
    // Purchases
    // =========================================================================

    /// Sells `quantity` units of a washer to a registered customer.
    ///
    /// The stock decrement, the customer history entry and the ledger entry
    /// are applied together; any failure leaves all three untouched.
    ///
    /// ## Returns
    /// * `Ok(Washer)` - The washer after the decrement
    /// * `Err(CoreError::CustomerNotFound)`
    /// * `Err(CoreError::WasherNotFound)`
    /// * `Err(CoreError::InvalidQuantity)` - Zero, negative or oversized quantity
    /// * `Err(CoreError::InsufficientStock)`
    pub fn purchase_washer(
        &mut self,
        customer_id: &str,
        brand: &str,
        model: &str,
        quantity: i64,
    ) -> CoreResult<Washer> {
        let id = customer_id.parse::<CustomerId>()?;
        if !self.customers.contains(id) {
            return Err(CoreError::CustomerNotFound(customer_id.to_string()));
        }

        let unit_price = self
            .catalogue
            .find(brand, model)
            .map(|washer| washer.price)
            .ok_or_else(|| CoreError::washer_not_found(brand, model))?;

        let amount = validation::validate_purchase_quantity(quantity)
            .map_err(|_| CoreError::InvalidQuantity {
                requested: quantity,
            })?;

        let on_hand = self.catalogue.decrement_quantity(brand, model, amount)?;

        let record = PurchaseRecord {
            receipt_id: Uuid::new_v4(),
            brand: brand.to_string(),
            model: model.to_string(),
            quantity: amount,
            unit_price,
            purchased_at: Utc::now(),
        };
        let entry = LedgerEntry {
            receipt_id: record.receipt_id,
            customer_id: id,
            washer: record.key(),
            quantity: amount,
            unit_price,
            purchased_at: record.purchased_at,
        };

        if let Err(e) = self.customers.record_purchase(id, record) {
            // Undo the decrement so the failed purchase leaves no trace
            self.catalogue.add_quantity(brand, model, amount)?;
            return Err(e);
        }
        self.ledger.record(entry);

        info!(
            customer_id = %id,
            brand = %brand,
            model = %model,
            quantity = amount,
            on_hand,
            "Washer purchased"
        );

        self.catalogue
            .find(brand, model)
            .cloned()
            .ok_or_else(|| CoreError::washer_not_found(brand, model))
    }

    /// Totals over every purchase so far.
    pub fn sales_summary(&self) -> SalesSummary {
        self.ledger.summary()
    }

    // =========================================================================
    // Read-only component access
    // =========================================================================

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn customers(&self) -> &CustomerRegistry {
        &self.customers
    }

    pub fn ledger(&self) -> &PurchaseLedger {
        &self.ledger
    }

    /// The identifier the next registered customer will receive.
    pub fn next_customer_id(&self) -> u64 {
        self.issuer.peek()
    }

    // =========================================================================
    // Snapshot encode / decode
    // =========================================================================

    /// Captures the full state for persistence.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            saved_at: Utc::now(),
            company: CompanyState {
                catalogue: self.catalogue.list().cloned().collect(),
                customers: self.customers.list().cloned().collect(),
                ledger: self.ledger.clone(),
            },
            identifiers: IdentifierState {
                next_id: self.issuer.peek(),
            },
        }
    }

    /// Rebuilds a company from a snapshot, checking cross-component invariants.
    ///
    /// ## Checks
    /// - Schema version supported by this build
    /// - Washers pass the same validation as [`add_washer`](Self::add_washer)
    /// - No duplicate washers, customer identifiers or listing index keys
    /// - Ledger only references stocked washers and registered customers
    /// - Every ledger entry matches one purchase in that customer's history,
    ///   and every history purchase has a ledger entry
    /// - Identifiers within range; a counter behind the registered identifiers
    ///   is repaired, not rejected
    pub fn restore(snapshot: Snapshot) -> CoreResult<Self> {
        let header = SnapshotHeader {
            schema_version: snapshot.schema_version,
        };
        if !header.is_supported() {
            return Err(CoreError::CorruptSnapshot(format!(
                "unsupported schema version {}",
                snapshot.schema_version
            )));
        }

        let CompanyState {
            catalogue: washers,
            customers,
            ledger,
        } = snapshot.company;

        let mut catalogue = Catalogue::new();
        for washer in washers {
            catalogue.insert_restored(washer)?;
        }

        let mut registry = CustomerRegistry::new();
        for customer in customers {
            registry.insert_restored(customer)?;
        }

        let mut indexed = BTreeSet::new();
        for key in ledger.stock_order() {
            if !catalogue.contains(key) {
                return Err(CoreError::CorruptSnapshot(format!(
                    "listing index references unknown washer {}",
                    key
                )));
            }
            if !indexed.insert(key) {
                return Err(CoreError::CorruptSnapshot(format!(
                    "listing index repeats washer {}",
                    key
                )));
            }
        }

        let mut histories: BTreeMap<(CustomerId, Uuid), &PurchaseRecord> = BTreeMap::new();
        for customer in registry.list() {
            for record in &customer.purchases {
                if histories
                    .insert((customer.id, record.receipt_id), record)
                    .is_some()
                {
                    return Err(CoreError::CorruptSnapshot(format!(
                        "customer {} lists receipt {} twice",
                        customer.id, record.receipt_id
                    )));
                }
            }
        }

        for entry in ledger.entries() {
            if !catalogue.contains(&entry.washer) {
                return Err(CoreError::CorruptSnapshot(format!(
                    "receipt {} references unknown washer {}",
                    entry.receipt_id, entry.washer
                )));
            }
            if !registry.contains(entry.customer_id) {
                return Err(CoreError::CorruptSnapshot(format!(
                    "receipt {} references unknown customer {}",
                    entry.receipt_id, entry.customer_id
                )));
            }

            let record = histories
                .remove(&(entry.customer_id, entry.receipt_id))
                .ok_or_else(|| {
                    CoreError::CorruptSnapshot(format!(
                        "receipt {} missing from customer {} history",
                        entry.receipt_id, entry.customer_id
                    ))
                })?;
            if record.key() != entry.washer
                || record.quantity != entry.quantity
                || record.unit_price != entry.unit_price
            {
                return Err(CoreError::CorruptSnapshot(format!(
                    "receipt {} differs between ledger and customer {} history",
                    entry.receipt_id, entry.customer_id
                )));
            }
        }

        if let Some((customer_id, receipt_id)) = histories.keys().next() {
            return Err(CoreError::CorruptSnapshot(format!(
                "receipt {} of customer {} has no ledger entry",
                receipt_id, customer_id
            )));
        }

        let mut ledger = ledger;
        for washer in catalogue.list() {
            if !ledger.stock_order().contains(&washer.key()) {
                warn!(washer = %washer.key(), "Washer missing from listing index, appending");
                ledger.index_washer(washer.key());
            }
        }

        let mut issuer = IdentifierIssuer::restored(snapshot.identifiers.next_id)?;
        if let Some(highest) = registry.highest_id() {
            if issuer.resume_after(highest)? {
                warn!(
                    stored = snapshot.identifiers.next_id,
                    highest = %highest,
                    "Identifier counter behind registered customers, advancing"
                );
            }
        }

        info!(
            washers = catalogue.len(),
            customers = registry.len(),
            purchases = ledger.entries().len(),
            next_customer_id = issuer.peek(),
            "Company restored from snapshot"
        );

        Ok(Company {
            catalogue,
            customers: registry,
            ledger,
            issuer,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
