//! Sale order models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One requested product line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLineRequest {
    pub product_id: i64,
    pub quantity: i32,
}

/// Body of `POST /orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub branch_id: i64,
    pub customer_id: i64,
    #[serde(default)]
    pub lines: Vec<OrderLineRequest>,
}

/// A committed sale with its line items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleOrder {
    pub id: i64,
    pub branch_id: i64,
    pub branch_name: String,
    pub customer_id: i64,
    pub customer_name: String,
    pub ordered_at: DateTime<Utc>,
    /// Always the sum of the line subtotals
    pub total_amount: Decimal,
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub lines: Vec<SaleLineItem>,
}

impl SaleOrder {
    pub fn lines_total(&self) -> Decimal {
        self.lines.iter().map(|l| l.subtotal).sum()
    }
}

/// An immutable order line with the price captured at sale time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLineItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Order header as shown in listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: i64,
    pub branch_id: i64,
    pub branch_name: String,
    pub customer_id: i64,
    pub customer_name: String,
    pub ordered_at: DateTime<Utc>,
    pub total_amount: Decimal,
    pub line_count: i64,
}
