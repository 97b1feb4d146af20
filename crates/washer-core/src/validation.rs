//! # Validation Module
//!
//! Input checks run by the [`Company`](crate::company::Company) facade before
//! any component is touched.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Interaction shell                                            │
//! │  └── Primitive syntax (is "10" a number?)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Labels present and bounded                                        │
//! │  ├── Prices non-negative                                               │
//! │  └── Quantities in range for the stock counter                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalogue / Registry                                         │
//! │  └── Uniqueness, existence, stock on hand                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_LABEL_LEN, MAX_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_label(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_LABEL_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_LABEL_LEN,
        });
    }

    Ok(())
}

/// Validates a washer brand.
///
/// ## Example
/// ```rust
/// use washer_core::validation::validate_brand;
///
/// assert!(validate_brand("Acme").is_ok());
/// assert!(validate_brand("   ").is_err());
/// ```
pub fn validate_brand(brand: &str) -> ValidationResult<()> {
    validate_label("brand", brand)
}

/// Validates a washer model.
pub fn validate_model(model: &str) -> ValidationResult<()> {
    validate_label("model", model)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a washer price. Zero is allowed (display units, giveaways).
///
/// The ceiling of [`MAX_PRICE`] keeps a line total (price × any `u32`
/// quantity) inside `i64`.
///
/// ## Example
/// ```rust
/// use washer_core::money::Money;
/// use washer_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(49999)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE.cents(),
        });
    }

    Ok(())
}

/// Validates an inventory addition and narrows it to the stock counter type.
///
/// ## Rules
/// - Must be non-negative (adding zero units is a no-op, not an error)
/// - Must fit in `u32`
pub fn validate_restock_quantity(qty: i64) -> ValidationResult<u32> {
    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 0,
        max: u32::MAX as i64,
    })
}

/// Validates a purchase quantity and narrows it to the stock counter type.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must fit in `u32`
///
/// ## User Workflow
/// ```text
/// Shell: purchase 3 × Acme X100
///      │
///      ▼
/// validate_purchase_quantity(3) ← THIS FUNCTION
///      │
///      ├── qty <= 0?       → Error: "quantity must be positive"
///      ├── qty > u32::MAX? → Error: "quantity must be between 1 and ..."
///      └── OK(3)           → Catalogue::decrement_quantity
/// ```
pub fn validate_purchase_quantity(qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: u32::MAX as i64,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
