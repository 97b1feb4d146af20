//! # Domain Types
//!
//! Records held by the catalogue and the customer registry.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Washer      │   │    Customer     │   │ PurchaseRecord  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  brand ┐ key    │   │  id (issued)    │   │  receipt_id     │       │
//! │  │  model ┘        │   │  name           │   │  brand, model   │       │
//! │  │  price          │   │  phone          │   │  quantity       │       │
//! │  │  quantity       │   │  purchases ─────┼──►│  unit_price     │       │
//! │  └─────────────────┘   └─────────────────┘   │  purchased_at   │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - Washer: the (brand, model) pair, see [`WasherKey`]
//! - Customer: the issued [`CustomerId`], immutable once assigned

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Washer Key
// =============================================================================

/// The (brand, model) identity of a washer. Exact, case-sensitive match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WasherKey {
    pub brand: String,
    pub model: String,
}

impl WasherKey {
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        WasherKey {
            brand: brand.into(),
            model: model.into(),
        }
    }
}

impl fmt::Display for WasherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.brand, self.model)
    }
}

// =============================================================================
// Washer
// =============================================================================

/// A catalogued washer model and how many units are on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Washer {
    /// Manufacturer name.
    pub brand: String,

    /// Model designation, unique per brand.
    pub model: String,

    /// Current selling price.
    pub price: Money,

    /// Units on hand. Unsigned, so never negative.
    #[serde(default)]
    pub quantity: u32,
}

impl Washer {
    /// Creates a washer with nothing on hand.
    pub fn new(brand: impl Into<String>, model: impl Into<String>, price: Money) -> Self {
        Washer {
            brand: brand.into(),
            model: model.into(),
            price,
            quantity: 0,
        }
    }

    /// Returns the (brand, model) identity.
    pub fn key(&self) -> WasherKey {
        WasherKey::new(&self.brand, &self.model)
    }

    /// Checks if `quantity` units can be sold from stock.
    pub fn can_sell(&self, quantity: u32) -> bool {
        self.quantity >= quantity
    }
}

impl fmt::Display for Washer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {} ({} on hand)",
            self.brand, self.model, self.price, self.quantity
        )
    }
}

// =============================================================================
// Customer Id
// =============================================================================

/// A system-issued customer identifier.
///
/// Rendered and parsed as a plain decimal string (`"1"`, `"2"`, ...), which
/// is what the interaction shell hands back when a customer is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(u64);

impl CustomerId {
    #[inline]
    pub const fn new(value: u64) -> Self {
        CustomerId(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomerId {
    type Err = CoreError;

    /// An identifier that does not parse cannot have been issued, so it is
    /// reported as not found.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(CustomerId)
            .map_err(|_| CoreError::CustomerNotFound(s.to_string()))
    }
}

// =============================================================================
// Purchase Record
// =============================================================================

/// One line of a customer's purchase history.
///
/// Uses the snapshot pattern: brand, model and unit price are frozen at the
/// moment of purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Receipt id, shared with the matching ledger entry.
    pub receipt_id: Uuid,
    pub brand: String,
    pub model: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub purchased_at: DateTime<Utc>,
}

impl PurchaseRecord {
    /// Returns the washer this record refers to.
    pub fn key(&self) -> WasherKey {
        WasherKey::new(&self.brand, &self.model)
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered buyer and everything they have purchased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub purchases: Vec<PurchaseRecord>,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Customer {
            id,
            name: name.into(),
            phone: phone.into(),
            purchases: Vec::new(),
        }
    }

    /// Total washers bought across all purchases.
    pub fn units_purchased(&self) -> u64 {
        self.purchases.iter().map(|p| p.quantity as u64).sum()
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({}), {} purchase(s)",
            self.id,
            self.name,
            self.phone,
            self.purchases.len()
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_washer_has_no_stock() {
        let washer = Washer::new("Acme", "X100", Money::from_cents(49999));
        assert_eq!(washer.quantity, 0);
        assert_eq!(washer.key(), WasherKey::new("Acme", "X100"));
        assert!(washer.can_sell(0));
        assert!(!washer.can_sell(1));
    }

    #[test]
    fn test_washer_key_ordering_is_brand_then_model() {
        let mut keys = vec![
            WasherKey::new("Zeta", "A1"),
            WasherKey::new("Acme", "X200"),
            WasherKey::new("Acme", "X100"),
        ];
        keys.sort();
        assert_eq!(keys[0], WasherKey::new("Acme", "X100"));
        assert_eq!(keys[2], WasherKey::new("Zeta", "A1"));
    }

    #[test]
    fn test_customer_id_parsing() {
        assert_eq!("1".parse::<CustomerId>().unwrap(), CustomerId::new(1));
        assert_eq!(" 42 ".parse::<CustomerId>().unwrap(), CustomerId::new(42));
        assert!(matches!(
            "M1".parse::<CustomerId>(),
            Err(CoreError::CustomerNotFound(id)) if id == "M1"
        ));
        assert!("-3".parse::<CustomerId>().is_err());
        assert_eq!(CustomerId::new(7).to_string(), "7");
    }

    #[test]
    fn test_purchase_line_total() {
        let record = PurchaseRecord {
            receipt_id: Uuid::new_v4(),
            brand: "Acme".to_string(),
            model: "X100".to_string(),
            quantity: 3,
            unit_price: Money::from_cents(49999),
            purchased_at: Utc::now(),
        };
        assert_eq!(record.line_total().cents(), 149997);
        assert_eq!(record.key(), WasherKey::new("Acme", "X100"));
    }

    #[test]
    fn test_display() {
        let washer = Washer::new("Acme", "X100", Money::from_cents(49999));
        assert_eq!(washer.to_string(), "Acme X100 @ $499.99 (0 on hand)");

        let customer = Customer::new(CustomerId::new(1), "Jane Doe", "555-1212");
        assert_eq!(customer.to_string(), "#1 Jane Doe (555-1212), 0 purchase(s)");
    }
}
