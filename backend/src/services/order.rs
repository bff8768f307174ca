//! Order processor: validates, prices and commits sale orders atomically

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{CreateOrderRequest, OrderListQuery, OrderSummary, SaleLineItem, SaleOrder};
use crate::services::{CatalogService, InventoryService};
use shared::{planner, DateWindow};

/// Sale order service
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

impl OrderService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an order with its lines, drawing down branch stock in the same transaction
    pub async fn create_order(&self, input: CreateOrderRequest) -> AppResult<SaleOrder> {
        let catalog = CatalogService::new(self.db.clone());

        // Reference checks run before any row is locked
        catalog.require_branch(input.branch_id).await?;
        catalog
            .require_customer_of_branch(input.customer_id, input.branch_id)
            .await?;

        if input.lines.is_empty() {
            return Err(AppError::EmptyOrder);
        }

        let mut product_ids: Vec<i64> = input.lines.iter().map(|l| l.product_id).collect();
        product_ids.sort_unstable();
        product_ids.dedup();

        let products = catalog.products_by_ids(&product_ids).await?;

        let mut tx = self.db.begin().await?;

        let stock = InventoryService::lock_stock(&mut tx, input.branch_id, &product_ids).await?;

        let plan = planner::plan_order(&input.lines, &products, &stock).map_err(|e| {
            tracing::warn!(
                branch_id = input.branch_id,
                customer_id = input.customer_id,
                "Order rejected: {}",
                e
            );
            AppError::from(e)
        })?;

        for (product_id, quantity) in plan.reservations() {
            let name = plan.product_name(product_id).unwrap_or_default();
            InventoryService::reserve(&mut tx, input.branch_id, product_id, quantity, name).await?;
        }

        let (order_id, ordered_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO sale_orders (branch_id, customer_id, ordered_at, total_amount)
            VALUES ($1, $2, NOW(), $3)
            RETURNING id, ordered_at
            "#,
        )
        .bind(input.branch_id)
        .bind(input.customer_id)
        .bind(plan.total)
        .fetch_one(&mut *tx)
        .await?;

        for line in &plan.lines {
            sqlx::query(
                r#"
                INSERT INTO sale_line_items (order_id, product_id, quantity, unit_price, subtotal)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(line.subtotal)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            order_id,
            branch_id = input.branch_id,
            lines = plan.lines.len(),
            total = %plan.total,
            %ordered_at,
            "Order committed"
        );

        self.get_order(order_id).await
    }

    /// Order header with its lines
    pub async fn get_order(&self, order_id: i64) -> AppResult<SaleOrder> {
        let mut order = sqlx::query_as::<_, SaleOrder>(
            r#"
            SELECT o.id, o.branch_id, b.name AS branch_name,
                   o.customer_id, c.name AS customer_name,
                   o.ordered_at, o.total_amount
            FROM sale_orders o
            JOIN branches b ON b.id = o.branch_id
            JOIN customers c ON c.id = o.customer_id
            WHERE o.id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {}", order_id)))?;

        order.lines = sqlx::query_as::<_, SaleLineItem>(
            r#"
            SELECT li.id, li.order_id, li.product_id, p.name AS product_name,
                   li.quantity, li.unit_price, li.subtotal
            FROM sale_line_items li
            JOIN products p ON p.id = li.product_id
            WHERE li.order_id = $1
            ORDER BY li.id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(order)
    }

    /// Orders matching the filter, newest first
    pub async fn list_orders(&self, filter: &OrderListQuery) -> AppResult<Vec<OrderSummary>> {
        let window = DateWindow::from_bounds(filter.start, filter.end)?;

        let catalog = CatalogService::new(self.db.clone());
        if let Some(branch_id) = filter.branch_id {
            if catalog.get_branch(branch_id).await?.is_none() {
                return Err(AppError::NotFound(format!("Branch {}", branch_id)));
            }
        }
        if let Some(customer_id) = filter.customer_id {
            if catalog.get_customer(customer_id).await?.is_none() {
                return Err(AppError::NotFound(format!("Customer {}", customer_id)));
            }
        }

        let (from, until) = match window.map(|w| w.utc_bounds()) {
            Some((from, until)) => (Some(from), Some(until)),
            None => (None, None),
        };

        tracing::debug!(?filter, "Listing orders");

        let orders = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT o.id, o.branch_id, b.name AS branch_name,
                   o.customer_id, c.name AS customer_name,
                   o.ordered_at, o.total_amount,
                   (SELECT COUNT(*) FROM sale_line_items li WHERE li.order_id = o.id) AS line_count
            FROM sale_orders o
            JOIN branches b ON b.id = o.branch_id
            JOIN customers c ON c.id = o.customer_id
            WHERE ($1::BIGINT IS NULL OR o.branch_id = $1)
              AND ($2::BIGINT IS NULL OR o.customer_id = $2)
              AND ($3::TIMESTAMPTZ IS NULL OR o.ordered_at >= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR o.ordered_at < $4)
            ORDER BY o.ordered_at DESC, o.id DESC
            "#,
        )
        .bind(filter.branch_id)
        .bind(filter.customer_id)
        .bind(from)
        .bind(until)
        .fetch_all(&self.db)
        .await?;

        Ok(orders)
    }

    /// Remove an order and its lines. Stock is not returned.
    pub async fn delete_order(&self, order_id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM sale_orders WHERE id = $1 FOR UPDATE")
                .bind(order_id)
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_none() {
            return Err(AppError::NotFound(format!("Order {}", order_id)));
        }

        sqlx::query("DELETE FROM sale_line_items WHERE order_id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM sale_orders WHERE id = $1")
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(order_id, "Order deleted");

        Ok(())
    }
}
