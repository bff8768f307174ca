//! Stock arithmetic for per-(branch, product) inventory records
//!
//! These functions are the only place the "no negative stock" rule is spelled
//! out. The backend runs them against a row it holds locked and writes the
//! returned quantity back in the same transaction.

use crate::error::LedgerError;

/// Quantity left after taking `requested` units out of `available`
pub fn reserve(available: i32, requested: i32) -> Result<i32, LedgerError> {
    if requested <= 0 {
        return Err(LedgerError::NonPositiveQuantity(i64::from(requested)));
    }
    if requested > available {
        return Err(LedgerError::Insufficient {
            available,
            requested: i64::from(requested),
        });
    }
    Ok(available - requested)
}

/// Quantity after applying a signed correction (positive restocks, negative consumes)
pub fn apply_delta(current: i32, delta: i32) -> Result<i32, LedgerError> {
    let next = i64::from(current) + i64::from(delta);
    if next < 0 {
        return Err(LedgerError::Insufficient {
            available: current,
            requested: -i64::from(delta),
        });
    }
    i32::try_from(next).map_err(|_| LedgerError::Overflow)
}

/// Validate an absolute count used for initial stocking
pub fn validate_count(quantity: i32) -> Result<i32, LedgerError> {
    if quantity < 0 {
        return Err(LedgerError::NegativeCount(i64::from(quantity)));
    }
    Ok(quantity)
}
