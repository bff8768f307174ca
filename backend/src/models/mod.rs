//! Database models for the Branch Sales Ledger
//!
//! Re-exports models from the shared crate and adds backend-specific query types

use chrono::NaiveDate;
use serde::Deserialize;
use shared::TopProductsBy;

pub use shared::models::*;

/// Filters for `GET /orders`
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub branch_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Query for `GET /inventory/low-stock`
#[derive(Debug, Default, Deserialize)]
pub struct LowStockQuery {
    pub min: Option<i32>,
}

/// Query for `GET /reports/top-products`
#[derive(Debug, Default, Deserialize)]
pub struct TopProductsQuery {
    /// Trailing window in days; ignored when `start`/`end` are given
    pub window: Option<u32>,
    pub top: Option<u32>,
    #[serde(default)]
    pub by: TopProductsBy,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub format: Option<String>,
}

/// Query for `GET /reports/daily`
#[derive(Debug, Default, Deserialize)]
pub struct DailySalesQuery {
    pub days: Option<u32>,
    pub format: Option<String>,
}

/// Export format selector shared by the rollup endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

/// Query for `GET /reports/period`
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub year: i32,
    pub month: i32,
}
