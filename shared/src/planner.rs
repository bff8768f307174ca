//! Order planning: per-line validation, price snapshots and stock draw-down
//!
//! The backend loads the products and the locked inventory counts for an
//! order, then calls [`plan_order`]. Lines are checked in request order and
//! the first failing line decides the error. Lines repeating a product draw
//! from the same running availability.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, OrderError};
use crate::ledger;
use crate::models::{OrderLineRequest, Product};
use crate::types::{line_subtotal, max_line_amount};

/// A validated, priced order line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Everything needed to persist an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPlan {
    pub lines: Vec<PlannedLine>,
    pub total: Decimal,
}

impl OrderPlan {
    /// Units to take per product, ascending by product id
    pub fn reservations(&self) -> BTreeMap<i64, i32> {
        let mut out = BTreeMap::new();
        for line in &self.lines {
            *out.entry(line.product_id).or_insert(0) += line.quantity;
        }
        out
    }

    /// Product name for a planned product id
    pub fn product_name(&self, product_id: i64) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.product_name.as_str())
    }
}

/// Validate and price an order against catalog and stock snapshots
///
/// `stock` holds the on-hand quantity for each product stocked at the branch;
/// a missing key means the product is not stocked there.
pub fn plan_order(
    lines: &[OrderLineRequest],
    products: &HashMap<i64, Product>,
    stock: &HashMap<i64, i32>,
) -> Result<OrderPlan, OrderError> {
    if lines.is_empty() {
        return Err(OrderError::EmptyOrder);
    }

    let mut remaining: HashMap<i64, i32> = HashMap::new();
    let mut planned = Vec::with_capacity(lines.len());
    let mut total = Decimal::ZERO;

    for line in lines {
        if line.quantity <= 0 {
            return Err(OrderError::InvalidQuantity {
                product_id: line.product_id,
            });
        }

        let product = products
            .get(&line.product_id)
            .ok_or(OrderError::UnknownProduct {
                product_id: line.product_id,
            })?;

        if !product.active {
            return Err(OrderError::InactiveProduct {
                name: product.name.clone(),
            });
        }

        let available = match remaining.get(&product.id) {
            Some(left) => *left,
            None => *stock.get(&product.id).ok_or_else(|| OrderError::NotStocked {
                name: product.name.clone(),
            })?,
        };

        let left = ledger::reserve(available, line.quantity).map_err(|e| match e {
            LedgerError::Insufficient { available, .. } => OrderError::InsufficientStock {
                name: product.name.clone(),
                available,
            },
            _ => OrderError::InvalidQuantity {
                product_id: product.id,
            },
        })?;
        remaining.insert(product.id, left);

        let subtotal = line_subtotal(product.unit_price, line.quantity);
        if subtotal > max_line_amount() {
            return Err(OrderError::LineAmountTooLarge {
                product_id: product.id,
                max: max_line_amount(),
            });
        }
        total += subtotal;
        if total > max_line_amount() {
            return Err(OrderError::TotalTooLarge {
                max: max_line_amount(),
            });
        }
        planned.push(PlannedLine {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity: line.quantity,
            unit_price: product.unit_price,
            subtotal,
        });
    }

    Ok(OrderPlan {
        lines: planned,
        total,
    })
}
