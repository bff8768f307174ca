//! Read-side rollups over the order and report ledgers

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sales per branch, ranked by total
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BranchSales {
    pub branch_id: i64,
    pub branch_name: String,
    pub total_sales: Decimal,
    pub order_count: i64,
}

/// Product ranking entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TopProduct {
    pub product_id: i64,
    pub product_name: String,
    pub quantity_sold: i64,
    pub revenue: Decimal,
}

/// Ranking key for top-product queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TopProductsBy {
    #[default]
    Quantity,
    Revenue,
}

/// One point of the daily sales series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DailySales {
    pub date: NaiveDate,
    pub total_sales: Decimal,
    pub order_count: i64,
}

/// Report-ledger totals for one month across all scopes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MonthlySummary {
    pub year: i32,
    pub month: i32,
    pub total_sales: Decimal,
    pub report_count: i64,
}

/// Report-ledger totals for a single (year, month)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodSummary {
    pub year: i32,
    pub month: i32,
    pub total_sales: Decimal,
    pub branches_included: i64,
}

/// One branch's share of a period, summed over report details.
/// Details are not tied to master data, so the branch name may be missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BranchPeriodSales {
    pub branch_id: i64,
    pub branch_name: Option<String>,
    pub total_sales: Decimal,
    pub quantity_sold: i64,
}

/// Headline figures for the operations dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_sales: Decimal,
    pub active_products: i64,
    pub active_branches: i64,
    pub average_sales_per_branch: Decimal,
}
