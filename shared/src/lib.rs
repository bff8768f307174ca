//! Shared types and domain rules for the Branch Sales Ledger
//!
//! Everything in this crate is free of I/O: the backend loads snapshots from
//! the store, hands them to these functions, and writes back whatever they
//! decide. That keeps the stock, pricing and period rules testable on their own.

pub mod error;
pub mod ledger;
pub mod models;
pub mod period;
pub mod planner;
pub mod rollup;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use types::*;
