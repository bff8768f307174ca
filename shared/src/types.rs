//! Common types used across the ledger

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::RangeError;

/// Money amounts are stored with two decimal places
pub const MONEY_SCALE: u32 = 2;

/// Largest amount a line subtotal or an order total may carry (NUMERIC(12,2))
pub fn max_line_amount() -> Decimal {
    Decimal::new(9_999_999_999_99, MONEY_SCALE)
}

/// Largest total a period report may carry (NUMERIC(14,2))
pub fn max_report_total() -> Decimal {
    Decimal::new(999_999_999_999_99, MONEY_SCALE)
}

/// Round an amount to the stored money scale
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Subtotal of a line: unit price times quantity, at money scale
pub fn line_subtotal(unit_price: Decimal, quantity: i32) -> Decimal {
    round_money(unit_price * Decimal::from(quantity))
}

/// Entity a period report's uniqueness is keyed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "report_scope", rename_all = "lowercase"))]
pub enum ScopeKind {
    #[default]
    Region,
    Branch,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Region => "region",
            ScopeKind::Branch => "branch",
        }
    }
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeKind::Region => write!(f, "Region"),
            ScopeKind::Branch => write!(f, "Branch"),
        }
    }
}

/// Inclusive calendar date window `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Build a window, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// The last `days` calendar days, ending with (and including) `today`
    pub fn trailing(today: NaiveDate, days: u32) -> Result<Self, RangeError> {
        if days == 0 {
            return Err(RangeError::EmptyWindow);
        }
        let start = today
            .checked_sub_days(Days::new(u64::from(days) - 1))
            .ok_or(RangeError::EmptyWindow)?;
        Ok(Self { start, end: today })
    }

    /// Build from optional bounds; both or neither must be given
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<Self>, RangeError> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end).map(Some),
            (None, None) => Ok(None),
            _ => Err(RangeError::IncompleteBounds),
        }
    }

    /// Every date in the window, ascending
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Half-open UTC timestamp bounds `[start 00:00, end+1 00:00)` for timestamp columns
    pub fn utc_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let lower = self.start.and_time(NaiveTime::MIN).and_utc();
        let upper = self
            .end
            .succ_opt()
            .unwrap_or(NaiveDate::MAX)
            .and_time(NaiveTime::MIN)
            .and_utc();
        (lower, upper)
    }
}
