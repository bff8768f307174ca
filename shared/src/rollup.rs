//! Post-processing for aggregation query results

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::DailySales;
use crate::types::{round_money, DateWindow};

/// One entry per day of the window, ascending; days without sales are zero
pub fn fill_daily_series(window: &DateWindow, rows: &[DailySales]) -> Vec<DailySales> {
    let by_date: HashMap<NaiveDate, &DailySales> = rows.iter().map(|r| (r.date, r)).collect();

    window
        .dates()
        .map(|date| match by_date.get(&date) {
            Some(row) => (*row).clone(),
            None => DailySales {
                date,
                total_sales: Decimal::ZERO,
                order_count: 0,
            },
        })
        .collect()
}

/// Average sales per active branch, zero when there are no branches
pub fn average_per_branch(total: Decimal, branches: i64) -> Decimal {
    if branches <= 0 {
        return Decimal::ZERO;
    }
    round_money(total / Decimal::from(branches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_series_has_one_entry_per_day() {
        let window = DateWindow::new(date(2025, 1, 1), date(2025, 1, 5)).unwrap();
        let rows = vec![
            DailySales {
                date: date(2025, 1, 2),
                total_sales: Decimal::from(40),
                order_count: 2,
            },
            DailySales {
                date: date(2025, 1, 5),
                total_sales: Decimal::from(10),
                order_count: 1,
            },
        ];

        let series = fill_daily_series(&window, &rows);

        assert_eq!(series.len(), 5);
        assert_eq!(series[0].date, date(2025, 1, 1));
        assert_eq!(series[0].total_sales, Decimal::ZERO);
        assert_eq!(series[1].order_count, 2);
        assert_eq!(series[4].total_sales, Decimal::from(10));
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_series_ignores_rows_outside_window() {
        let window = DateWindow::new(date(2025, 1, 1), date(2025, 1, 2)).unwrap();
        let rows = vec![DailySales {
            date: date(2025, 1, 9),
            total_sales: Decimal::from(99),
            order_count: 1,
        }];
        let series = fill_daily_series(&window, &rows);
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|d| d.order_count == 0));
    }

    #[test]
    fn test_average_per_branch() {
        assert_eq!(
            average_per_branch(Decimal::from(100), 3),
            Decimal::from_str("33.33").unwrap()
        );
        assert_eq!(average_per_branch(Decimal::from(100), 0), Decimal::ZERO);
    }
}
