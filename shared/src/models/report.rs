//! Period report models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::ScopeKind;

/// One pre-aggregated line of a period submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportDetailInput {
    pub branch_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub subtotal: Decimal,
}

/// Body of `POST /reports/period`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitReportRequest {
    pub scope_id: i64,

    #[validate(range(min = 2020, max = 2100, message = "Year must be between 2020 and 2100"))]
    pub year: i32,

    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[serde(default)]
    pub details: Vec<ReportDetailInput>,
}

/// A period report; at most one exists per (scope, year, month)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PeriodReport {
    pub id: i64,
    pub scope_kind: ScopeKind,
    pub scope_id: i64,
    pub year: i32,
    pub month: i32,
    /// Always the sum of the detail subtotals
    pub total_amount: Decimal,
    pub received_at: DateTime<Utc>,
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub details: Vec<ReportDetail>,
}

impl PeriodReport {
    pub fn details_total(&self) -> Decimal {
        self.details.iter().map(|d| d.subtotal).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ReportDetail {
    pub id: i64,
    pub report_id: i64,
    pub branch_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub subtotal: Decimal,
}
