//! Domain models for the Branch Sales Ledger

mod catalog;
mod inventory;
mod order;
mod report;
mod rollup;

pub use catalog::*;
pub use inventory::*;
pub use order::*;
pub use report::*;
pub use rollup::*;
