//! Domain errors raised by the pure ledger rules
//!
//! The backend maps each of these onto its HTTP-facing error type.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Stock arithmetic failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Insufficient stock: requested {requested}, available {available}")]
    Insufficient { available: i32, requested: i64 },

    #[error("Quantity must be greater than zero (got {0})")]
    NonPositiveQuantity(i64),

    #[error("Stock count cannot be negative (got {0})")]
    NegativeCount(i64),

    #[error("Stock count would overflow")]
    Overflow,
}

/// Reasons an order request is rejected, reported for the first failing line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("An order must include at least one product")]
    EmptyOrder,

    #[error("Quantity for product {product_id} must be greater than zero")]
    InvalidQuantity { product_id: i64 },

    #[error("Product {product_id} does not exist")]
    UnknownProduct { product_id: i64 },

    #[error("Product '{name}' is not active")]
    InactiveProduct { name: String },

    #[error("Product '{name}' is not stocked at this branch")]
    NotStocked { name: String },

    #[error("Insufficient stock for '{name}'. Available: {available}")]
    InsufficientStock { name: String, available: i32 },

    #[error("Amount for product {product_id} exceeds the maximum of {max}")]
    LineAmountTooLarge { product_id: i64, max: Decimal },

    #[error("Order total exceeds the maximum of {max}")]
    TotalTooLarge { max: Decimal },
}

/// Reasons a period report submission is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("A report must include at least one detail")]
    EmptyReport,

    #[error("Detail {index}: quantity must be greater than zero")]
    InvalidQuantity { index: usize },

    #[error("Detail {index}: subtotal cannot be negative")]
    NegativeSubtotal { index: usize },

    #[error("Detail {index}: subtotal exceeds the maximum of {max}")]
    SubtotalTooLarge { index: usize, max: Decimal },

    #[error("Report total exceeds the maximum of {max}")]
    TotalTooLarge { max: Decimal },
}

/// Invalid date windows for reporting queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Start date {start} is after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },

    #[error("Both start and end dates are required")]
    IncompleteBounds,

    #[error("Window must cover at least one day")]
    EmptyWindow,
}
