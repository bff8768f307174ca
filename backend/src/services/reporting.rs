//! Reporting service for sales rollups and data export
//! Provides per-branch totals, product rankings, daily series and monthly summaries

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{
    BranchPeriodSales, BranchSales, DailySales, DashboardSummary, MonthlySummary, PeriodSummary,
    TopProduct,
};
use shared::{rollup, validation, DateWindow, TopProductsBy};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Total sales and order count per branch, highest total first
    pub async fn sales_by_branch(&self) -> AppResult<Vec<BranchSales>> {
        let rows = sqlx::query_as::<_, BranchSales>(
            r#"
            SELECT b.id AS branch_id,
                   b.name AS branch_name,
                   SUM(o.total_amount) AS total_sales,
                   COUNT(o.id) AS order_count
            FROM sale_orders o
            JOIN branches b ON b.id = o.branch_id
            GROUP BY b.id, b.name
            ORDER BY total_sales DESC, b.id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Best selling products, optionally restricted to a date window
    pub async fn top_products(
        &self,
        window: Option<DateWindow>,
        top: u32,
        by: TopProductsBy,
    ) -> AppResult<Vec<TopProduct>> {
        let order_by = match by {
            TopProductsBy::Quantity => "quantity_sold DESC, p.id ASC",
            TopProductsBy::Revenue => "revenue DESC, p.id ASC",
        };
        let (from, until) = match window.map(|w| w.utc_bounds()) {
            Some((from, until)) => (Some(from), Some(until)),
            None => (None, None),
        };

        tracing::debug!(?window, top, ?by, "Top products query");

        let rows = sqlx::query_as::<_, TopProduct>(&format!(
            r#"
            SELECT p.id AS product_id,
                   p.name AS product_name,
                   SUM(li.quantity)::BIGINT AS quantity_sold,
                   SUM(li.subtotal) AS revenue
            FROM sale_line_items li
            JOIN sale_orders o ON o.id = li.order_id
            JOIN products p ON p.id = li.product_id
            WHERE ($1::TIMESTAMPTZ IS NULL OR o.ordered_at >= $1)
              AND ($2::TIMESTAMPTZ IS NULL OR o.ordered_at < $2)
            GROUP BY p.id, p.name
            ORDER BY {}
            LIMIT $3
            "#,
            order_by
        ))
        .bind(from)
        .bind(until)
        .bind(i64::from(top))
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// One entry per day of the window, zero-filled, oldest first
    pub async fn daily_sales(&self, window: DateWindow) -> AppResult<Vec<DailySales>> {
        let (from, until) = window.utc_bounds();

        tracing::debug!(?window, "Daily sales query");

        let rows = sqlx::query_as::<_, DailySales>(
            r#"
            SELECT (o.ordered_at AT TIME ZONE 'UTC')::DATE AS date,
                   SUM(o.total_amount) AS total_sales,
                   COUNT(*) AS order_count
            FROM sale_orders o
            WHERE o.ordered_at >= $1 AND o.ordered_at < $2
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(from)
        .bind(until)
        .fetch_all(&self.db)
        .await?;

        Ok(rollup::fill_daily_series(&window, &rows))
    }

    /// Report-ledger totals per month, newest first
    pub async fn monthly_summaries(&self) -> AppResult<Vec<MonthlySummary>> {
        let rows = sqlx::query_as::<_, MonthlySummary>(
            r#"
            SELECT year, month,
                   SUM(total_amount) AS total_sales,
                   COUNT(*) AS report_count
            FROM period_reports
            GROUP BY year, month
            ORDER BY year DESC, month DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Report-ledger total for one period and the number of branches it covers
    pub async fn period_summary(&self, year: i32, month: i32) -> AppResult<PeriodSummary> {
        check_period(year, month)?;

        let (report_count, total_sales): (i64, Decimal) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(total_amount), 0)
            FROM period_reports
            WHERE year = $1 AND month = $2
            "#,
        )
        .bind(year)
        .bind(month)
        .fetch_one(&self.db)
        .await?;

        if report_count == 0 {
            return Err(AppError::NotFound(format!(
                "Reports for {:02}/{}",
                month, year
            )));
        }

        let (branches_included,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(DISTINCT d.branch_id)
            FROM report_details d
            JOIN period_reports r ON r.id = d.report_id
            WHERE r.year = $1 AND r.month = $2
            "#,
        )
        .bind(year)
        .bind(month)
        .fetch_one(&self.db)
        .await?;

        Ok(PeriodSummary {
            year,
            month,
            total_sales,
            branches_included,
        })
    }

    /// Report-detail totals per branch for one period, highest total first
    pub async fn period_branches(&self, year: i32, month: i32) -> AppResult<Vec<BranchPeriodSales>> {
        check_period(year, month)?;

        tracing::debug!(year, month, "Period branch breakdown query");

        let rows = sqlx::query_as::<_, BranchPeriodSales>(
            r#"
            SELECT d.branch_id,
                   b.name AS branch_name,
                   SUM(d.subtotal) AS total_sales,
                   SUM(d.quantity)::BIGINT AS quantity_sold
            FROM report_details d
            JOIN period_reports r ON r.id = d.report_id
            LEFT JOIN branches b ON b.id = d.branch_id
            WHERE r.year = $1 AND r.month = $2
            GROUP BY d.branch_id, b.name
            ORDER BY total_sales DESC, d.branch_id ASC
            "#,
        )
        .bind(year)
        .bind(month)
        .fetch_all(&self.db)
        .await?;

        if rows.is_empty() {
            return Err(AppError::NotFound(format!(
                "Branch sales for {:02}/{}",
                month, year
            )));
        }

        Ok(rows)
    }

    /// Headline figures over the whole order ledger
    pub async fn dashboard(&self) -> AppResult<DashboardSummary> {
        let (total_sales,): (Decimal,) =
            sqlx::query_as("SELECT COALESCE(SUM(total_amount), 0) FROM sale_orders")
                .fetch_one(&self.db)
                .await?;

        let (active_products,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE active")
                .fetch_one(&self.db)
                .await?;

        let (active_branches,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM branches WHERE active")
                .fetch_one(&self.db)
                .await?;

        Ok(DashboardSummary {
            total_sales,
            active_products,
            active_branches,
            average_sales_per_branch: rollup::average_per_branch(total_sales, active_branches),
        })
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

fn check_period(year: i32, month: i32) -> AppResult<()> {
    validation::validate_period(year, month).map_err(|m| AppError::Validation {
        field: "period".to_string(),
        message: m.to_string(),
    })
}
