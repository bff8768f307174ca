//! Reporting handlers

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{
    DailySalesQuery, DashboardSummary, ExportQuery, MonthlySummary, PeriodSummary,
    TopProductsQuery,
};
use crate::services::ReportingService;
use crate::AppState;
use shared::{validation, DateWindow};

/// Respond with JSON, or CSV when `format=csv`
fn respond<T: Serialize>(data: Vec<T>, format: Option<&str>, filename: &str) -> AppResult<Response> {
    if format == Some("csv") {
        let csv = ReportingService::export_to_csv(&data)?;
        let disposition = format!("attachment; filename=\"{}\"", filename);
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(data).into_response())
    }
}

fn invalid(field: &str) -> impl FnOnce(&'static str) -> AppError + '_ {
    move |message| AppError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Get total sales per branch
pub async fn get_sales_by_branch(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let service = ReportingService::new(state.db.clone());
    let data = service.sales_by_branch().await?;
    respond(data, query.format.as_deref(), "sales_by_branch.csv")
}

/// Get the best selling products
pub async fn get_top_products(
    State(state): State<AppState>,
    Query(query): Query<TopProductsQuery>,
) -> AppResult<Response> {
    let limits = &state.config.reporting;

    let top = query.top.unwrap_or(limits.default_top);
    validation::validate_top(top, limits.max_top).map_err(invalid("top"))?;

    // Explicit bounds win over a trailing window
    let window = match DateWindow::from_bounds(query.start, query.end)? {
        Some(window) => Some(window),
        None => match query.window {
            Some(days) => {
                validation::validate_window_days(days, limits.max_window_days)
                    .map_err(invalid("window"))?;
                Some(DateWindow::trailing(Utc::now().date_naive(), days)?)
            }
            None => None,
        },
    };

    let service = ReportingService::new(state.db.clone());
    let data = service.top_products(window, top, query.by).await?;
    respond(data, query.format.as_deref(), "top_products.csv")
}

/// Get the daily sales series over a trailing window
pub async fn get_daily_sales(
    State(state): State<AppState>,
    Query(query): Query<DailySalesQuery>,
) -> AppResult<Response> {
    let limits = &state.config.reporting;

    let days = query.days.unwrap_or(limits.default_window_days);
    validation::validate_window_days(days, limits.max_window_days).map_err(invalid("days"))?;
    let window = DateWindow::trailing(Utc::now().date_naive(), days)?;

    let service = ReportingService::new(state.db.clone());
    let data = service.daily_sales(window).await?;
    respond(data, query.format.as_deref(), "daily_sales.csv")
}

/// Get report-ledger totals per month
pub async fn get_monthly_summaries(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MonthlySummary>>> {
    let service = ReportingService::new(state.db.clone());
    let data = service.monthly_summaries().await?;
    Ok(Json(data))
}

/// Get the report-ledger summary of one period
pub async fn get_period_summary(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, i32)>,
) -> AppResult<Json<PeriodSummary>> {
    let service = ReportingService::new(state.db.clone());
    let summary = service.period_summary(year, month).await?;
    Ok(Json(summary))
}

/// Get per-branch totals of one period, highest first
pub async fn get_period_branches(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, i32)>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let service = ReportingService::new(state.db.clone());
    let data = service.period_branches(year, month).await?;
    let filename = format!("branch_sales_{}_{:02}.csv", year, month);
    respond(data, query.format.as_deref(), &filename)
}

/// Get dashboard figures
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardSummary>> {
    let service = ReportingService::new(state.db.clone());
    let summary = service.dashboard().await?;
    Ok(Json(summary))
}
