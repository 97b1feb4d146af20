//! # Customer Registry
//!
//! Customers keyed by their issued identifier. Registration cannot fail:
//! identifiers come from the [`IdentifierIssuer`], so collisions are
//! impossible by construction.

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::identifier::IdentifierIssuer;
use crate::types::{Customer, CustomerId, PurchaseRecord};

/// All registered customers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerRegistry {
    customers: BTreeMap<CustomerId, Customer>,
}

impl CustomerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a customer under a freshly issued identifier.
    pub fn register(
        &mut self,
        issuer: &mut IdentifierIssuer,
        name: &str,
        phone: &str,
    ) -> Customer {
        let customer = Customer::new(issuer.next(), name, phone);
        self.customers.insert(customer.id, customer.clone());
        customer
    }

    pub fn find(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    pub fn contains(&self, id: CustomerId) -> bool {
        self.customers.contains_key(&id)
    }

    /// Read-only view of every customer in identifier order.
    pub fn list(&self) -> impl Iterator<Item = &Customer> + Clone + '_ {
        self.customers.values()
    }

    /// Highest identifier currently registered.
    pub fn highest_id(&self) -> Option<CustomerId> {
        self.customers.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Appends a purchase to a customer's history.
    pub(crate) fn record_purchase(
        &mut self,
        id: CustomerId,
        record: PurchaseRecord,
    ) -> CoreResult<()> {
        let customer = self
            .customers
            .get_mut(&id)
            .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))?;
        customer.purchases.push(record);
        Ok(())
    }

    /// Inserts a restored record. Fails if the identifier is already present.
    pub(crate) fn insert_restored(&mut self, customer: Customer) -> CoreResult<()> {
        if self.customers.contains_key(&customer.id) {
            return Err(CoreError::CorruptSnapshot(format!(
                "duplicate customer id {}",
                customer.id
            )));
        }
        self.customers.insert(customer.id, customer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_register_issues_distinct_ids() {
        let mut issuer = IdentifierIssuer::new();
        let mut registry = CustomerRegistry::new();

        let jane = registry.register(&mut issuer, "Jane Doe", "555-1212");
        let john = registry.register(&mut issuer, "John Roe", "555-3434");

        assert_eq!(jane.id, CustomerId::new(1));
        assert_eq!(john.id, CustomerId::new(2));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.highest_id(), Some(CustomerId::new(2)));
    }

    #[test]
    fn test_register_allows_same_name_and_phone() {
        let mut issuer = IdentifierIssuer::new();
        let mut registry = CustomerRegistry::new();

        let a = registry.register(&mut issuer, "Jane Doe", "555-1212");
        let b = registry.register(&mut issuer, "Jane Doe", "555-1212");
        assert_ne!(a.id, b.id);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_find() {
        let mut issuer = IdentifierIssuer::new();
        let mut registry = CustomerRegistry::new();
        let jane = registry.register(&mut issuer, "Jane Doe", "555-1212");

        assert_eq!(registry.find(jane.id), Some(&jane));
        assert!(registry.find(CustomerId::new(99)).is_none());
        assert!(registry.highest_id().is_some());
    }

    #[test]
    fn test_record_purchase() {
        let mut issuer = IdentifierIssuer::new();
        let mut registry = CustomerRegistry::new();
        let jane = registry.register(&mut issuer, "Jane Doe", "555-1212");

        let record = PurchaseRecord {
            receipt_id: Uuid::new_v4(),
            brand: "Acme".to_string(),
            model: "X100".to_string(),
            quantity: 2,
            unit_price: Money::from_cents(49999),
            purchased_at: Utc::now(),
        };
        registry.record_purchase(jane.id, record.clone()).unwrap();

        let stored = registry.find(jane.id).unwrap();
        assert_eq!(stored.purchases, vec![record.clone()]);
        assert_eq!(stored.units_purchased(), 2);

        let err = registry
            .record_purchase(CustomerId::new(50), record)
            .unwrap_err();
        assert_eq!(err, CoreError::CustomerNotFound("50".to_string()));
    }

    #[test]
    fn test_empty_registry() {
        let registry = CustomerRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.highest_id(), None);
        assert_eq!(registry.list().count(), 0);
    }
}
