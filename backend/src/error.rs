//! Error handling for the Branch Sales Ledger
//!
//! Every failure leaves the server as an `AppError`; the response body is
//! `{"error": {"code", "message", "field"}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{LedgerError, OrderError, RangeError, ReportError};
use thiserror::Error;

/// Constraint backing the one-report-per-period rule
pub const PERIOD_UNIQUE_CONSTRAINT: &str = "period_reports_scope_period_key";

/// Constraint backing the non-negative stock rule
pub const STOCK_CHECK_CONSTRAINT: &str = "inventory_quantity_non_negative";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidReference(String),

    #[error("Product '{0}' is not active")]
    InactiveProduct(String),

    #[error("{0}")]
    InvalidQuantity(String),

    #[error("An order must include at least one product")]
    EmptyOrder,

    #[error("A report must include at least one detail")]
    EmptyReport,

    #[error("{0}")]
    InsufficientStock(String),

    #[error("Product '{0}' is not stocked at this branch")]
    NotStocked(String),

    #[error("A report for {scope} {scope_id} already exists for {month:02}/{year}")]
    DuplicatePeriod {
        scope: String,
        scope_id: i64,
        year: i32,
        month: i32,
    },

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidReference(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicatePeriod { .. } => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidReference(_) => "INVALID_REFERENCE",
            AppError::InactiveProduct(_) => "INACTIVE_PRODUCT",
            AppError::InvalidQuantity(_) => "INVALID_QUANTITY",
            AppError::EmptyOrder => "EMPTY_ORDER",
            AppError::EmptyReport => "EMPTY_REPORT",
            AppError::InsufficientStock(_) => "INSUFFICIENT_STOCK",
            AppError::NotStocked(_) => "NOT_STOCKED",
            AppError::DuplicatePeriod { .. } => "DUPLICATE_PERIOD",
            AppError::InvalidRange(_) => "INVALID_RANGE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation { .. } | AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True when a sqlx error is a violation of the named constraint
    pub fn is_constraint_violation(err: &sqlx::Error, constraint: &str) -> bool {
        match err {
            sqlx::Error::Database(db_err) => db_err.constraint() == Some(constraint),
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_detail = match &self {
            AppError::NotFound(resource) => ErrorDetail {
                code: self.code().to_string(),
                message: format!("{} not found", resource),
                field: None,
            },
            AppError::Validation { field, message } => ErrorDetail {
                code: self.code().to_string(),
                message: message.clone(),
                field: Some(field.clone()),
            },
            AppError::ValidationError(msg) => ErrorDetail {
                code: self.code().to_string(),
                message: msg.clone(),
                field: None,
            },
            AppError::DatabaseError(_) => ErrorDetail {
                code: self.code().to_string(),
                message: "A database error occurred".to_string(),
                field: None,
            },
            AppError::Internal(_) => ErrorDetail {
                code: self.code().to_string(),
                message: "An internal server error occurred".to_string(),
                field: None,
            },
            other => ErrorDetail {
                code: other.code().to_string(),
                message: other.to_string(),
                field: None,
            },
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyOrder => AppError::EmptyOrder,
            OrderError::InvalidQuantity { .. } => AppError::InvalidQuantity(err.to_string()),
            OrderError::UnknownProduct { .. } => AppError::InvalidReference(err.to_string()),
            OrderError::InactiveProduct { name } => AppError::InactiveProduct(name),
            OrderError::NotStocked { name } => AppError::NotStocked(name),
            OrderError::InsufficientStock { .. } => AppError::InsufficientStock(err.to_string()),
            OrderError::LineAmountTooLarge { .. } => AppError::InvalidQuantity(err.to_string()),
            OrderError::TotalTooLarge { .. } => AppError::Validation {
                field: "lines".to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Insufficient { available, .. } => AppError::InsufficientStock(format!(
                "Insufficient stock. Current quantity: {}",
                available
            )),
            LedgerError::NonPositiveQuantity(_) | LedgerError::NegativeCount(_) => {
                AppError::InvalidQuantity(err.to_string())
            }
            LedgerError::Overflow => AppError::Validation {
                field: "quantity".to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::EmptyReport => AppError::EmptyReport,
            ReportError::InvalidQuantity { .. } => AppError::InvalidQuantity(err.to_string()),
            ReportError::NegativeSubtotal { index }
            | ReportError::SubtotalTooLarge { index, .. } => AppError::Validation {
                field: format!("details[{}].subtotal", index),
                message: err.to_string(),
            },
            ReportError::TotalTooLarge { .. } => AppError::Validation {
                field: "details".to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl From<RangeError> for AppError {
    fn from(err: RangeError) -> Self {
        AppError::InvalidRange(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                AppError::Validation {
                    field: field.to_string(),
                    message,
                }
            }
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
