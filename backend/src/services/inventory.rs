//! Inventory ledger: per-(branch, product) stock with a no-negative rule
//!
//! Every write locks the row, checks the change with `shared::ledger`, and
//! writes with a conditional update. The `inventory_quantity_non_negative`
//! check constraint backs the rule at the store.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};

use crate::error::{AppError, AppResult, STOCK_CHECK_CONSTRAINT};
use crate::models::InventoryRecord;
use crate::services::CatalogService;
use shared::{ledger, LedgerError, OrderError};

const RECORD_SELECT: &str = r#"
    SELECT i.id, i.branch_id, b.name AS branch_name, i.product_id,
           p.name AS product_name, p.unit_price, i.quantity, i.updated_at
    FROM inventory i
    JOIN branches b ON b.id = i.branch_id
    JOIN products p ON p.id = i.product_id
"#;

/// Inventory service for stock reads, reservations and corrections
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

impl InventoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Current record for a (branch, product) pair
    pub async fn get_available(&self, branch_id: i64, product_id: i64) -> AppResult<InventoryRecord> {
        let record = sqlx::query_as::<_, InventoryRecord>(&format!(
            "{} WHERE i.branch_id = $1 AND i.product_id = $2",
            RECORD_SELECT
        ))
        .bind(branch_id)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?;

        record.ok_or_else(|| {
            AppError::NotFound(format!(
                "Inventory for product {} at branch {}",
                product_id, branch_id
            ))
        })
    }

    /// Lock the inventory rows of a branch for the given products, in ascending
    /// product order, and return their quantities. Unstocked products are absent.
    pub async fn lock_stock(
        conn: &mut PgConnection,
        branch_id: i64,
        product_ids: &[i64],
    ) -> AppResult<HashMap<i64, i32>> {
        let rows: Vec<(i64, i32)> = sqlx::query_as(
            r#"
            SELECT product_id, quantity
            FROM inventory
            WHERE branch_id = $1 AND product_id = ANY($2)
            ORDER BY product_id
            FOR UPDATE
            "#,
        )
        .bind(branch_id)
        .bind(product_ids)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Take `quantity` units out of stock on the caller's transaction.
    /// Never commits; returns the quantity left.
    pub async fn reserve(
        conn: &mut PgConnection,
        branch_id: i64,
        product_id: i64,
        quantity: i32,
        product_name: &str,
    ) -> AppResult<i32> {
        let current: Option<(i32,)> = sqlx::query_as(
            r#"
            SELECT quantity
            FROM inventory
            WHERE branch_id = $1 AND product_id = $2
            FOR UPDATE
            "#,
        )
        .bind(branch_id)
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await?;

        let (available,) = current.ok_or_else(|| AppError::NotStocked(product_name.to_string()))?;

        let left = ledger::reserve(available, quantity).map_err(|e| match e {
            LedgerError::Insufficient { available, .. } => {
                tracing::warn!(
                    branch_id,
                    product_id,
                    requested = quantity,
                    available,
                    "Stock reservation rejected"
                );
                AppError::from(OrderError::InsufficientStock {
                    name: product_name.to_string(),
                    available,
                })
            }
            other => AppError::from(other),
        })?;

        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET quantity = quantity - $3, updated_at = NOW()
            WHERE branch_id = $1 AND product_id = $2 AND quantity >= $3
            "#,
        )
        .bind(branch_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            stock_violation(e, || {
                AppError::from(OrderError::InsufficientStock {
                    name: product_name.to_string(),
                    available,
                })
            })
        })?;

        if result.rows_affected() != 1 {
            return Err(AppError::InsufficientStock(format!(
                "Insufficient stock for '{}'",
                product_name
            )));
        }

        Ok(left)
    }

    /// Apply a signed correction in its own transaction
    pub async fn adjust(&self, branch_id: i64, product_id: i64, delta: i32) -> AppResult<InventoryRecord> {
        let mut tx = self.db.begin().await?;

        let current: Option<(i32,)> = sqlx::query_as(
            r#"
            SELECT quantity
            FROM inventory
            WHERE branch_id = $1 AND product_id = $2
            FOR UPDATE
            "#,
        )
        .bind(branch_id)
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (current,) = current.ok_or_else(|| {
            AppError::NotFound(format!(
                "Inventory for product {} at branch {}",
                product_id, branch_id
            ))
        })?;

        let next = ledger::apply_delta(current, delta).map_err(|e| {
            tracing::warn!(branch_id, product_id, delta, current, "Stock adjustment rejected");
            AppError::from(e)
        })?;

        sqlx::query(
            r#"
            UPDATE inventory
            SET quantity = $3, updated_at = NOW()
            WHERE branch_id = $1 AND product_id = $2
            "#,
        )
        .bind(branch_id)
        .bind(product_id)
        .bind(next)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            stock_violation(e, || {
                AppError::from(LedgerError::Insufficient {
                    available: current,
                    requested: -i64::from(delta),
                })
            })
        })?;

        tx.commit().await?;

        tracing::info!(branch_id, product_id, delta, quantity = next, "Stock adjusted");

        self.get_available(branch_id, product_id).await
    }

    /// Create the record or overwrite its count with an absolute quantity
    pub async fn create_or_update_count(
        &self,
        branch_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> AppResult<InventoryRecord> {
        let quantity = ledger::validate_count(quantity)?;

        let catalog = CatalogService::new(self.db.clone());
        catalog.require_branch(branch_id).await?;
        catalog.require_product(product_id).await?;

        sqlx::query(
            r#"
            INSERT INTO inventory (branch_id, product_id, quantity, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (branch_id, product_id)
            DO UPDATE SET quantity = EXCLUDED.quantity, updated_at = NOW()
            "#,
        )
        .bind(branch_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&self.db)
        .await?;

        tracing::info!(branch_id, product_id, quantity, "Stock count set");

        self.get_available(branch_id, product_id).await
    }

    /// All stock records of a branch, by product id
    pub async fn list_by_branch(&self, branch_id: i64) -> AppResult<Vec<InventoryRecord>> {
        let catalog = CatalogService::new(self.db.clone());
        if catalog.get_branch(branch_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Branch {}", branch_id)));
        }

        let records = sqlx::query_as::<_, InventoryRecord>(&format!(
            "{} WHERE i.branch_id = $1 ORDER BY i.product_id",
            RECORD_SELECT
        ))
        .bind(branch_id)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    /// Records at or below `threshold`, lowest stock first
    pub async fn low_stock(&self, threshold: i32) -> AppResult<Vec<InventoryRecord>> {
        tracing::debug!(threshold, "Low stock query");

        let records = sqlx::query_as::<_, InventoryRecord>(&format!(
            "{} WHERE i.quantity <= $1 ORDER BY i.quantity ASC, i.branch_id ASC, i.product_id ASC",
            RECORD_SELECT
        ))
        .bind(threshold)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }
}

/// Map a check-constraint violation on the stock column to the caller's conflict error
fn stock_violation(err: sqlx::Error, conflict: impl FnOnce() -> AppError) -> AppError {
    if AppError::is_constraint_violation(&err, STOCK_CHECK_CONSTRAINT) {
        conflict()
    } else {
        AppError::DatabaseError(err)
    }
}
