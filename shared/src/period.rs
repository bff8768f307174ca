//! Period report assembly
//!
//! A submission is checked detail by detail and its total is derived from the
//! subtotals. The caller never supplies the total.

use rust_decimal::Decimal;

use crate::error::ReportError;
use crate::models::ReportDetailInput;
use crate::types::{max_line_amount, max_report_total, round_money};

/// Validated report content ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    pub details: Vec<ReportDetailInput>,
    pub total: Decimal,
}

/// Check every detail and compute the report total
pub fn build_report(details: &[ReportDetailInput]) -> Result<ReportDraft, ReportError> {
    if details.is_empty() {
        return Err(ReportError::EmptyReport);
    }

    let mut total = Decimal::ZERO;
    let mut normalized = Vec::with_capacity(details.len());
    for (index, detail) in details.iter().enumerate() {
        if detail.quantity <= 0 {
            return Err(ReportError::InvalidQuantity { index });
        }
        if detail.subtotal < Decimal::ZERO {
            return Err(ReportError::NegativeSubtotal { index });
        }
        let subtotal = round_money(detail.subtotal);
        if subtotal > max_line_amount() {
            return Err(ReportError::SubtotalTooLarge {
                index,
                max: max_line_amount(),
            });
        }
        total += subtotal;
        if total > max_report_total() {
            return Err(ReportError::TotalTooLarge {
                max: max_report_total(),
            });
        }
        normalized.push(ReportDetailInput {
            subtotal,
            ..detail.clone()
        });
    }

    Ok(ReportDraft {
        details: normalized,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn detail(branch_id: i64, product_id: i64, quantity: i32, subtotal: &str) -> ReportDetailInput {
        ReportDetailInput {
            branch_id,
            product_id,
            quantity,
            subtotal: Decimal::from_str(subtotal).unwrap(),
        }
    }

    #[test]
    fn test_total_is_sum_of_subtotals() {
        let draft = build_report(&[detail(1, 1, 3, "100.00"), detail(2, 1, 2, "50.50")]).unwrap();
        assert_eq!(draft.total, Decimal::from_str("150.50").unwrap());
        assert_eq!(draft.details.len(), 2);
    }

    #[test]
    fn test_empty_report_rejected() {
        assert_eq!(build_report(&[]), Err(ReportError::EmptyReport));
    }

    #[test]
    fn test_detail_quantity_must_be_positive() {
        let err = build_report(&[detail(1, 1, 1, "1.00"), detail(1, 2, 0, "1.00")]).unwrap_err();
        assert_eq!(err, ReportError::InvalidQuantity { index: 1 });
    }

    #[test]
    fn test_negative_subtotal_rejected() {
        let err = build_report(&[detail(1, 1, 1, "-0.01")]).unwrap_err();
        assert_eq!(err, ReportError::NegativeSubtotal { index: 0 });
    }

    #[test]
    fn test_zero_subtotal_allowed() {
        let draft = build_report(&[detail(1, 1, 4, "0")]).unwrap();
        assert_eq!(draft.total, Decimal::ZERO);
    }

    #[test]
    fn test_amounts_beyond_storage_are_rejected() {
        let err = build_report(&[detail(1, 1, 1, "1.00"), detail(1, 2, 1, "10000000000.00")])
            .unwrap_err();
        assert_eq!(
            err,
            ReportError::SubtotalTooLarge {
                index: 1,
                max: max_line_amount()
            }
        );

        // 100 full details still fit, the 101st pushes the total over
        let full = detail(1, 1, 1, "9999999999.99");
        assert!(build_report(&vec![full.clone(); 100]).is_ok());
        let err = build_report(&vec![full; 101]).unwrap_err();
        assert_eq!(
            err,
            ReportError::TotalTooLarge {
                max: max_report_total()
            }
        );
    }

    fn detail_strategy() -> impl Strategy<Value = ReportDetailInput> {
        (1i64..=20, 1i64..=50, 1i32..=500, 0i64..=10_000_000).prop_map(
            |(branch_id, product_id, quantity, cents)| ReportDetailInput {
                branch_id,
                product_id,
                quantity,
                subtotal: Decimal::new(cents, 2),
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_report_total_matches_details(details in prop::collection::vec(detail_strategy(), 1..30)) {
            let draft = build_report(&details).unwrap();
            let sum: Decimal = draft.details.iter().map(|d| d.subtotal).sum();
            prop_assert_eq!(draft.total, sum);
            prop_assert_eq!(draft.details.len(), details.len());
        }
    }
}
