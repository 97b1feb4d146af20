//! # Catalogue
//!
//! Washer records keyed by (brand, model).
//!
//! ## Key Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stock(brand, model, price)   → new Washer, quantity 0                  │
//! │  find(brand, model)           → Option<&Washer>                         │
//! │  add_quantity(.., amount)     → quantity += amount                      │
//! │  decrement_quantity(.., n)    → quantity -= n, never below zero         │
//! │  list()                       → read-only iterator, key order           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantity changes always land on the matched record: each (brand, model)
//! owns its own counter.

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Washer, WasherKey};
use crate::validation;

/// The washer inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    washers: BTreeMap<WasherKey, Washer>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new washer with nothing on hand.
    ///
    /// ## Returns
    /// * `Ok(Washer)` - Copy of the stored record
    /// * `Err(CoreError::AlreadyExists)` - Pair already stocked; the existing
    ///   record is left as it was
    pub fn stock(&mut self, brand: &str, model: &str, price: Money) -> CoreResult<Washer> {
        let key = WasherKey::new(brand, model);
        if self.washers.contains_key(&key) {
            return Err(CoreError::AlreadyExists {
                brand: key.brand,
                model: key.model,
            });
        }

        let washer = Washer::new(brand, model, price);
        self.washers.insert(key, washer.clone());
        Ok(washer)
    }

    /// Exact-match lookup.
    pub fn find(&self, brand: &str, model: &str) -> Option<&Washer> {
        self.washers.get(&WasherKey::new(brand, model))
    }

    /// Looks up by key.
    pub fn get(&self, key: &WasherKey) -> Option<&Washer> {
        self.washers.get(key)
    }

    pub fn contains(&self, key: &WasherKey) -> bool {
        self.washers.contains_key(key)
    }

    /// Adds units to the matched washer.
    ///
    /// ## Returns
    /// * `Ok(u32)` - New quantity on hand
    /// * `Err(CoreError::WasherNotFound)` - No such washer
    /// * `Err(CoreError::InvalidQuantity)` - Sum does not fit the counter
    pub fn add_quantity(&mut self, brand: &str, model: &str, amount: u32) -> CoreResult<u32> {
        let washer = self.find_mut(brand, model)?;
        let quantity = washer
            .quantity
            .checked_add(amount)
            .ok_or(CoreError::InvalidQuantity {
                requested: amount as i64,
            })?;
        washer.quantity = quantity;
        Ok(quantity)
    }

    /// Removes units from the matched washer.
    ///
    /// ## Returns
    /// * `Ok(u32)` - New quantity on hand
    /// * `Err(CoreError::WasherNotFound)` - No such washer
    /// * `Err(CoreError::InsufficientStock)` - Fewer than `amount` on hand;
    ///   quantity unchanged
    pub fn decrement_quantity(&mut self, brand: &str, model: &str, amount: u32) -> CoreResult<u32> {
        let washer = self.find_mut(brand, model)?;
        if !washer.can_sell(amount) {
            return Err(CoreError::InsufficientStock {
                brand: washer.brand.clone(),
                model: washer.model.clone(),
                available: washer.quantity,
                requested: amount,
            });
        }
        washer.quantity -= amount;
        Ok(washer.quantity)
    }

    /// Read-only view of every washer, ordered by brand then model.
    ///
    /// Each call starts a fresh pass over the current state.
    pub fn list(&self) -> impl Iterator<Item = &Washer> + Clone + '_ {
        self.washers.values()
    }

    pub fn len(&self) -> usize {
        self.washers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.washers.is_empty()
    }

    /// Inserts a restored record.
    ///
    /// Fails if the key is already present or the record would not pass the
    /// checks applied when stocking.
    pub(crate) fn insert_restored(&mut self, washer: Washer) -> CoreResult<()> {
        validation::validate_brand(&washer.brand)
            .and_then(|_| validation::validate_model(&washer.model))
            .and_then(|_| validation::validate_price(washer.price))
            .map_err(|e| {
                CoreError::CorruptSnapshot(format!("washer {}: {}", washer.key(), e))
            })?;

        let key = washer.key();
        if self.washers.contains_key(&key) {
            return Err(CoreError::CorruptSnapshot(format!(
                "duplicate washer {}",
                key
            )));
        }
        self.washers.insert(key, washer);
        Ok(())
    }

    fn find_mut(&mut self, brand: &str, model: &str) -> CoreResult<&mut Washer> {
        self.washers
            .get_mut(&WasherKey::new(brand, model))
            .ok_or_else(|| CoreError::washer_not_found(brand, model))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn acme() -> Catalogue {
        let mut catalogue = Catalogue::new();
        catalogue
            .stock("Acme", "X100", Money::from_cents(49999))
            .unwrap();
        catalogue
    }

    #[test]
    fn test_stock_then_find() {
        let catalogue = acme();
        let washer = catalogue.find("Acme", "X100").unwrap();
        assert_eq!(washer.quantity, 0);
        assert_eq!(washer.price, Money::from_cents(49999));
        assert!(catalogue.find("Acme", "x100").is_none());
    }

    #[test]
    fn test_duplicate_stock_keeps_original() {
        let mut catalogue = acme();
        catalogue.add_quantity("Acme", "X100", 4).unwrap();

        let err = catalogue
            .stock("Acme", "X100", Money::from_cents(1))
            .unwrap_err();
        assert!(matches!(err, CoreError::AlreadyExists { .. }));

        let washer = catalogue.find("Acme", "X100").unwrap();
        assert_eq!(washer.price, Money::from_cents(49999));
        assert_eq!(washer.quantity, 4);
        assert_eq!(catalogue.len(), 1);
    }

    #[test]
    fn test_quantity_is_per_washer() {
        let mut catalogue = acme();
        catalogue
            .stock("Acme", "X200", Money::from_cents(59999))
            .unwrap();

        catalogue.add_quantity("Acme", "X100", 10).unwrap();

        assert_eq!(catalogue.find("Acme", "X100").unwrap().quantity, 10);
        assert_eq!(catalogue.find("Acme", "X200").unwrap().quantity, 0);
    }

    #[test]
    fn test_add_quantity_unknown_washer() {
        let mut catalogue = acme();
        let err = catalogue.add_quantity("Acme", "Nope", 1).unwrap_err();
        assert_eq!(err, CoreError::washer_not_found("Acme", "Nope"));
    }

    #[test]
    fn test_add_quantity_overflow_is_rejected() {
        let mut catalogue = acme();
        catalogue.add_quantity("Acme", "X100", u32::MAX).unwrap();
        let err = catalogue.add_quantity("Acme", "X100", 1).unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity { .. }));
        assert_eq!(catalogue.find("Acme", "X100").unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_decrement_insufficient_stock() {
        let mut catalogue = acme();
        catalogue.add_quantity("Acme", "X100", 2).unwrap();

        let err = catalogue.decrement_quantity("Acme", "X100", 3).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                brand: "Acme".to_string(),
                model: "X100".to_string(),
                available: 2,
                requested: 3,
            }
        );
        assert_eq!(catalogue.find("Acme", "X100").unwrap().quantity, 2);

        assert_eq!(catalogue.decrement_quantity("Acme", "X100", 2), Ok(0));
    }

    #[test]
    fn test_list_is_ordered_and_restartable() {
        let mut catalogue = Catalogue::new();
        catalogue.stock("Zeta", "Z1", Money::zero()).unwrap();
        catalogue.stock("Acme", "X100", Money::zero()).unwrap();

        let listing = catalogue.list();
        let first: Vec<_> = listing.clone().map(|w| w.brand.as_str()).collect();
        let second: Vec<_> = listing.map(|w| w.brand.as_str()).collect();
        assert_eq!(first, vec!["Acme", "Zeta"]);
        assert_eq!(first, second);
        assert_eq!(catalogue.list().count(), 2);
    }

    #[test]
    fn test_insert_restored_rejects_duplicates() {
        let mut catalogue = acme();
        let err = catalogue
            .insert_restored(Washer::new("Acme", "X100", Money::zero()))
            .unwrap_err();
        assert!(matches!(err, CoreError::CorruptSnapshot(_)));
    }

    #[test]
    fn test_insert_restored_rejects_invalid_records() {
        let mut catalogue = Catalogue::new();

        for washer in [
            Washer::new("Acme", "X100", Money::from_cents(-1)),
            Washer::new("", "X100", Money::zero()),
            Washer::new("Acme", "   ", Money::zero()),
            Washer::new("Acme", "X100", Money::from_cents(i64::MAX)),
        ] {
            let err = catalogue.insert_restored(washer).unwrap_err();
            assert!(matches!(err, CoreError::CorruptSnapshot(_)));
        }
        assert!(catalogue.is_empty());

        catalogue
            .insert_restored(Washer::new("Acme", "X100", Money::from_cents(49999)))
            .unwrap();
        assert_eq!(catalogue.len(), 1);
    }

    proptest! {
        /// Property: a freshly stocked washer is found with quantity 0.
        #[test]
        fn stock_then_find_has_zero_quantity(
            brand in "[A-Za-z][A-Za-z0-9 ]{0,20}",
            model in "[A-Z0-9-]{1,12}",
            cents in 0i64..10_000_000,
        ) {
            let mut catalogue = Catalogue::new();
            catalogue.stock(&brand, &model, Money::from_cents(cents)).unwrap();
            let washer = catalogue.find(&brand, &model).unwrap();
            prop_assert_eq!(washer.quantity, 0);
            prop_assert_eq!(washer.price.cents(), cents);
        }

        /// Property: additions accumulate.
        #[test]
        fn add_quantity_is_additive(q1 in 0u32..1_000_000, q2 in 0u32..1_000_000) {
            let mut catalogue = acme();
            catalogue.add_quantity("Acme", "X100", q1).unwrap();
            catalogue.add_quantity("Acme", "X100", q2).unwrap();
            prop_assert_eq!(catalogue.find("Acme", "X100").unwrap().quantity, q1 + q2);
        }

        /// Property: decrement succeeds exactly when stock suffices.
        #[test]
        fn decrement_never_goes_negative(on_hand in 0u32..10_000, requested in 0u32..20_000) {
            let mut catalogue = acme();
            catalogue.add_quantity("Acme", "X100", on_hand).unwrap();

            let result = catalogue.decrement_quantity("Acme", "X100", requested);
            let quantity = catalogue.find("Acme", "X100").unwrap().quantity;
            if requested <= on_hand {
                prop_assert_eq!(result, Ok(on_hand - requested));
                prop_assert_eq!(quantity, on_hand - requested);
            } else {
                let is_insufficient = matches!(result, Err(CoreError::InsufficientStock { .. }));
                prop_assert!(is_insufficient);
                prop_assert_eq!(quantity, on_hand);
            }
        }
    }
}
