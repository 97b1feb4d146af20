//! # Identifier Issuance
//!
//! Hands out customer identifiers. The counter travels with every snapshot so
//! a restored company never re-issues an identifier.
//!
//! ```text
//! issue 1, 2, 3 ──► persist { next_id: 4 } ──► restore ──► issue 4, 5, ...
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::CustomerId;

/// First identifier handed out by a fresh issuer.
pub const FIRST_CUSTOMER_ID: u64 = 1;

/// Highest identifier a restored snapshot may carry.
///
/// Keeps the counter far below `u64::MAX`, so `next` can always advance.
pub const MAX_CUSTOMER_ID: u64 = i64::MAX as u64;

/// Monotonic customer identifier generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierIssuer {
    next_id: u64,
}

impl IdentifierIssuer {
    /// Creates an issuer whose first identifier is [`FIRST_CUSTOMER_ID`].
    pub fn new() -> Self {
        IdentifierIssuer {
            next_id: FIRST_CUSTOMER_ID,
        }
    }

    /// Creates an issuer that continues from a persisted counter.
    ///
    /// A counter below [`FIRST_CUSTOMER_ID`] is raised to it.
    pub fn starting_at(next_id: u64) -> Self {
        IdentifierIssuer {
            next_id: next_id.max(FIRST_CUSTOMER_ID),
        }
    }

    /// Creates an issuer from a persisted counter, rejecting counters that
    /// could not have been produced by issuance.
    ///
    /// ## Returns
    /// * `Ok(IdentifierIssuer)` - Counter within range (0 is raised to 1)
    /// * `Err(CoreError::CorruptSnapshot)` - Counter more than one past
    ///   [`MAX_CUSTOMER_ID`]
    pub fn restored(next_id: u64) -> CoreResult<Self> {
        if next_id > MAX_CUSTOMER_ID + 1 {
            return Err(CoreError::CorruptSnapshot(format!(
                "identifier counter {} out of range",
                next_id
            )));
        }
        Ok(Self::starting_at(next_id))
    }

    /// Issues the next identifier and advances the counter.
    pub fn next(&mut self) -> CustomerId {
        let id = CustomerId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Returns the value the next call to [`next`](Self::next) will issue.
    pub fn peek(&self) -> u64 {
        self.next_id
    }

    /// Moves the counter strictly above `highest` if it is not already.
    ///
    /// ## Returns
    /// * `Ok(true)` - Counter had to be moved
    /// * `Ok(false)` - Counter was already above `highest`
    /// * `Err(CoreError::CorruptSnapshot)` - `highest` is above
    ///   [`MAX_CUSTOMER_ID`]; the counter is left unchanged
    pub fn resume_after(&mut self, highest: CustomerId) -> CoreResult<bool> {
        if self.next_id > highest.value() {
            return Ok(false);
        }
        let next_id = Some(highest.value())
            .filter(|id| *id <= MAX_CUSTOMER_ID)
            .and_then(|id| id.checked_add(1))
            .ok_or_else(|| {
                CoreError::CorruptSnapshot(format!("customer id {} out of range", highest))
            })?;
        self.next_id = next_id;
        Ok(true)
    }
}

impl Default for IdentifierIssuer {
    fn default() -> Self {
        IdentifierIssuer::new()
    }
}
