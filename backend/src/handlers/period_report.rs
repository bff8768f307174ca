//! Period report handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::models::{PeriodQuery, PeriodReport, SubmitReportRequest};
use crate::services::PeriodReportService;
use crate::AppState;

fn service(state: &AppState) -> PeriodReportService {
    PeriodReportService::new(state.db.clone(), state.config.reports.scope)
}

/// Submit a monthly report for a scope entity
pub async fn submit_period_report(
    State(state): State<AppState>,
    Json(input): Json<SubmitReportRequest>,
) -> AppResult<(StatusCode, Json<PeriodReport>)> {
    let report = service(&state).submit(input).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn get_period_report(
    State(state): State<AppState>,
    Path(report_id): Path<i64>,
) -> AppResult<Json<PeriodReport>> {
    let report = service(&state).get_report(report_id).await?;
    Ok(Json(report))
}

pub async fn list_reports_by_scope(
    State(state): State<AppState>,
    Path(scope_id): Path<i64>,
) -> AppResult<Json<Vec<PeriodReport>>> {
    let reports = service(&state).list_by_scope(scope_id).await?;
    Ok(Json(reports))
}

pub async fn list_reports_by_period(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Vec<PeriodReport>>> {
    let reports = service(&state)
        .list_by_period(query.year, query.month)
        .await?;
    Ok(Json(reports))
}
