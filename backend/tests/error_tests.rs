//! Error mapping tests
//!
//! Every domain failure must reach the caller with a distinct code and the
//! right status; storage failures must not leak diagnostics.

use axum::{http::StatusCode, response::IntoResponse};
use sales_ledger_backend::AppError;
use serde_json::Value;
use shared::{LedgerError, OrderError, RangeError, ReportError};

async fn render(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::SubmitReportRequest;
    use validator::Validate;

    #[tokio::test]
    async fn test_insufficient_stock_names_product_and_available() {
        let err = AppError::from(OrderError::InsufficientStock {
            name: "Coffee".to_string(),
            available: 2,
        });
        let (status, json) = render(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INSUFFICIENT_STOCK");
        let message = json["error"]["message"].as_str().unwrap();
        assert!(message.contains("Coffee"));
        assert!(message.contains("Available: 2"));
    }

    #[tokio::test]
    async fn test_order_errors_have_distinct_codes() {
        let cases = vec![
            (OrderError::EmptyOrder, "EMPTY_ORDER", StatusCode::BAD_REQUEST),
            (
                OrderError::InvalidQuantity { product_id: 1 },
                "INVALID_QUANTITY",
                StatusCode::BAD_REQUEST,
            ),
            (
                OrderError::UnknownProduct { product_id: 1 },
                "INVALID_REFERENCE",
                StatusCode::NOT_FOUND,
            ),
            (
                OrderError::InactiveProduct {
                    name: "Tea".to_string(),
                },
                "INACTIVE_PRODUCT",
                StatusCode::BAD_REQUEST,
            ),
            (
                OrderError::NotStocked {
                    name: "Tea".to_string(),
                },
                "NOT_STOCKED",
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, code, status) in cases {
            let (got_status, json) = render(AppError::from(err)).await;
            assert_eq!(got_status, status);
            assert_eq!(json["error"]["code"], code);
        }
    }

    #[tokio::test]
    async fn test_adjustment_message_shows_current_quantity() {
        let err = AppError::from(LedgerError::Insufficient {
            available: 4,
            requested: 5,
        });
        let (status, json) = render(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INSUFFICIENT_STOCK");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Current quantity: 4"));
    }

    #[tokio::test]
    async fn test_negative_count_is_invalid_quantity() {
        let (status, json) = render(AppError::from(LedgerError::NegativeCount(-3))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_QUANTITY");
    }

    #[tokio::test]
    async fn test_duplicate_period_is_conflict() {
        let err = AppError::DuplicatePeriod {
            scope: "Region".to_string(),
            scope_id: 3,
            year: 2025,
            month: 1,
        };
        let (status, json) = render(err).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "DUPLICATE_PERIOD");
        assert_eq!(
            json["error"]["message"],
            "A report for Region 3 already exists for 01/2025"
        );
    }

    #[tokio::test]
    async fn test_report_errors() {
        let (status, json) = render(AppError::from(ReportError::EmptyReport)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "EMPTY_REPORT");

        let (_, json) = render(AppError::from(ReportError::NegativeSubtotal { index: 2 })).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["field"], "details[2].subtotal");
    }

    #[tokio::test]
    async fn test_oversized_amounts_are_bad_requests() {
        let max = shared::max_line_amount();

        let (status, json) = render(AppError::from(OrderError::LineAmountTooLarge {
            product_id: 5,
            max,
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_QUANTITY");

        let (status, json) = render(AppError::from(OrderError::TotalTooLarge { max })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["field"], "lines");

        let (status, json) =
            render(AppError::from(ReportError::SubtotalTooLarge { index: 0, max })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["field"], "details[0].subtotal");

        let (status, json) = render(AppError::from(ReportError::TotalTooLarge {
            max: shared::max_report_total(),
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["field"], "details");
    }

    #[tokio::test]
    async fn test_range_error_is_bad_request() {
        let err = RangeError::StartAfterEnd {
            start: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        let (status, json) = render(AppError::from(err)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_RANGE");
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic() {
        let (status, json) = render(AppError::DatabaseError(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "DATABASE_ERROR");
        assert_eq!(json["error"]["message"], "A database error occurred");
        assert!(json["error"].get("field").is_none());
    }

    #[tokio::test]
    async fn test_missing_reference_is_not_found() {
        let (status, json) =
            render(AppError::InvalidReference("Branch 9 does not exist".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["message"], "Branch 9 does not exist");

        let (status, json) = render(AppError::NotFound("Order 7".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["message"], "Order 7 not found");
    }

    #[test]
    fn test_validation_errors_name_the_field() {
        let request = SubmitReportRequest {
            scope_id: 1,
            year: 2025,
            month: 0,
            details: vec![],
        };
        let err = AppError::from(request.validate().unwrap_err());

        match err {
            AppError::Validation { field, message } => {
                assert_eq!(field, "month");
                assert_eq!(message, "Month must be between 1 and 12");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_non_constraint_errors_are_not_violations() {
        assert!(!AppError::is_constraint_violation(
            &sqlx::Error::RowNotFound,
            "period_reports_scope_period_key"
        ));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn order_error_strategy() -> impl Strategy<Value = OrderError> {
        let name = "[A-Za-z ]{1,20}";
        prop_oneof![
            Just(OrderError::EmptyOrder),
            any::<i64>().prop_map(|product_id| OrderError::InvalidQuantity { product_id }),
            any::<i64>().prop_map(|product_id| OrderError::UnknownProduct { product_id }),
            name.prop_map(|name| OrderError::InactiveProduct { name }),
            name.prop_map(|name| OrderError::NotStocked { name }),
            (name, 0i32..10_000)
                .prop_map(|(name, available)| OrderError::InsufficientStock { name, available }),
            any::<i64>().prop_map(|product_id| OrderError::LineAmountTooLarge {
                product_id,
                max: shared::max_line_amount(),
            }),
            Just(OrderError::TotalTooLarge {
                max: shared::max_line_amount(),
            }),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Order rejections are caller errors, never server errors
        #[test]
        fn prop_order_errors_are_client_errors(err in order_error_strategy()) {
            let app_err = AppError::from(err);
            prop_assert!(app_err.status().is_client_error());
            prop_assert!(!app_err.code().is_empty());
        }

        /// The insufficient-stock message always carries the available count
        #[test]
        fn prop_insufficient_stock_reports_available(available in 0i32..1_000_000) {
            let app_err = AppError::from(OrderError::InsufficientStock {
                name: "Milk".to_string(),
                available,
            });
            let expected = format!("Available: {}", available);
            prop_assert!(app_err.to_string().contains(&expected));
        }
    }
}
