//! HTTP handlers for the Branch Sales Ledger

pub mod health;
pub mod inventory;
pub mod order;
pub mod period_report;
pub mod reporting;

pub use health::*;
pub use inventory::*;
pub use order::*;
pub use period_report::*;
pub use reporting::*;
