//! Period report builder: one report per (scope, year, month)

use std::collections::HashMap;

use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult, PERIOD_UNIQUE_CONSTRAINT};
use crate::models::{PeriodReport, ReportDetail, SubmitReportRequest};
use crate::services::CatalogService;
use shared::{period, validation, ScopeKind};

const REPORT_COLUMNS: &str = "id, scope_kind, scope_id, year, month, total_amount, received_at";

/// Period report service
#[derive(Clone)]
pub struct PeriodReportService {
    db: PgPool,
    scope: ScopeKind,
}

impl PeriodReportService {
    pub fn new(db: PgPool, scope: ScopeKind) -> Self {
        Self { db, scope }
    }

    /// Record a period report and its details atomically
    pub async fn submit(&self, input: SubmitReportRequest) -> AppResult<PeriodReport> {
        input.validate()?;

        CatalogService::new(self.db.clone())
            .require_scope(self.scope, input.scope_id)
            .await?;

        let draft = period::build_report(&input.details)?;

        let duplicate = || {
            tracing::warn!(
                scope = %self.scope,
                scope_id = input.scope_id,
                year = input.year,
                month = input.month,
                "Duplicate period report rejected"
            );
            AppError::DuplicatePeriod {
                scope: self.scope.to_string(),
                scope_id: input.scope_id,
                year: input.year,
                month: input.month,
            }
        };
        let storage = |e: sqlx::Error| {
            if AppError::is_constraint_violation(&e, PERIOD_UNIQUE_CONSTRAINT) {
                duplicate()
            } else {
                AppError::DatabaseError(e)
            }
        };

        let mut tx = self.db.begin().await?;

        let inserted = sqlx::query_as::<_, PeriodReport>(&format!(
            r#"
            INSERT INTO period_reports (scope_kind, scope_id, year, month, total_amount, received_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT ON CONSTRAINT {} DO NOTHING
            RETURNING {}
            "#,
            PERIOD_UNIQUE_CONSTRAINT, REPORT_COLUMNS
        ))
        .bind(self.scope)
        .bind(input.scope_id)
        .bind(input.year)
        .bind(input.month)
        .bind(draft.total)
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage)?;

        let mut report = inserted.ok_or_else(duplicate)?;

        for detail in &draft.details {
            let row = sqlx::query_as::<_, ReportDetail>(
                r#"
                INSERT INTO report_details (report_id, branch_id, product_id, quantity, subtotal)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, report_id, branch_id, product_id, quantity, subtotal
                "#,
            )
            .bind(report.id)
            .bind(detail.branch_id)
            .bind(detail.product_id)
            .bind(detail.quantity)
            .bind(detail.subtotal)
            .fetch_one(&mut *tx)
            .await?;
            report.details.push(row);
        }

        tx.commit().await.map_err(storage)?;

        tracing::info!(
            report_id = report.id,
            scope = %self.scope,
            scope_id = report.scope_id,
            year = report.year,
            month = report.month,
            total = %report.total_amount,
            "Period report recorded"
        );

        Ok(report)
    }

    pub async fn get_report(&self, report_id: i64) -> AppResult<PeriodReport> {
        let report = sqlx::query_as::<_, PeriodReport>(&format!(
            "SELECT {} FROM period_reports WHERE id = $1",
            REPORT_COLUMNS
        ))
        .bind(report_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {}", report_id)))?;

        let mut reports = self.attach_details(vec![report]).await?;
        reports
            .pop()
            .ok_or_else(|| AppError::Internal("report vanished while loading details".to_string()))
    }

    /// Reports of one scope entity, newest period first
    pub async fn list_by_scope(&self, scope_id: i64) -> AppResult<Vec<PeriodReport>> {
        let reports = sqlx::query_as::<_, PeriodReport>(&format!(
            r#"
            SELECT {} FROM period_reports
            WHERE scope_kind = $1 AND scope_id = $2
            ORDER BY year DESC, month DESC, id DESC
            "#,
            REPORT_COLUMNS
        ))
        .bind(self.scope)
        .bind(scope_id)
        .fetch_all(&self.db)
        .await?;

        self.attach_details(reports).await
    }

    /// Reports for one period, by scope id
    pub async fn list_by_period(&self, year: i32, month: i32) -> AppResult<Vec<PeriodReport>> {
        validation::validate_period(year, month).map_err(|m| AppError::Validation {
            field: "period".to_string(),
            message: m.to_string(),
        })?;

        let reports = sqlx::query_as::<_, PeriodReport>(&format!(
            r#"
            SELECT {} FROM period_reports
            WHERE year = $1 AND month = $2
            ORDER BY scope_kind, scope_id, id
            "#,
            REPORT_COLUMNS
        ))
        .bind(year)
        .bind(month)
        .fetch_all(&self.db)
        .await?;

        self.attach_details(reports).await
    }

    async fn attach_details(&self, mut reports: Vec<PeriodReport>) -> AppResult<Vec<PeriodReport>> {
        if reports.is_empty() {
            return Ok(reports);
        }

        let ids: Vec<i64> = reports.iter().map(|r| r.id).collect();
        let details = sqlx::query_as::<_, ReportDetail>(
            r#"
            SELECT id, report_id, branch_id, product_id, quantity, subtotal
            FROM report_details
            WHERE report_id = ANY($1)
            ORDER BY report_id, id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.db)
        .await?;

        let mut by_report: HashMap<i64, Vec<ReportDetail>> = HashMap::new();
        for detail in details {
            by_report.entry(detail.report_id).or_default().push(detail);
        }
        for report in &mut reports {
            report.details = by_report.remove(&report.id).unwrap_or_default();
        }

        Ok(reports)
    }
}
