//! # Error Types
//!
//! Domain-specific error types for washer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  washer-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  washer-store errors (separate crate)                                  │
//! │  └── StoreError       - Snapshot read/write failures                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → shell renders a message           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `add_inventory` does not use these: it reports through
//! [`InventoryOutcome`](crate::company::InventoryOutcome).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule failures returned by the catalogue, registry and facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No washer with this (brand, model) is stocked.
    #[error("Washer not found: {brand} {model}")]
    WasherNotFound { brand: String, model: String },

    /// No customer has been issued this identifier.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// A washer with this (brand, model) is already in the catalogue.
    #[error("Washer {brand} {model} already exists")]
    AlreadyExists { brand: String, model: String },

    /// Purchase or decrement would take quantity-on-hand below zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Purchase Acme X100 (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { brand: "Acme", model: "X100", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Shell shows: "Insufficient stock for Acme X100: available 3, requested 5"
    /// ```
    #[error("Insufficient stock for {brand} {model}: available {available}, requested {requested}")]
    InsufficientStock {
        brand: String,
        model: String,
        available: u32,
        requested: u32,
    },

    /// Quantity is zero, negative, or does not fit the stock counter.
    #[error("Invalid quantity: {requested}")]
    InvalidQuantity { requested: i64 },

    /// Snapshot content violates a model invariant.
    ///
    /// ## When This Occurs
    /// - The same (brand, model) appears twice
    /// - Two customers share an identifier
    /// - The ledger references a washer or customer that is not in the snapshot
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a WasherNotFound error for a (brand, model) pair.
    pub fn washer_not_found(brand: impl Into<String>, model: impl Into<String>) -> Self {
        CoreError::WasherNotFound {
            brand: brand.into(),
            model: model.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
