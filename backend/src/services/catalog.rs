//! Read-only access to master data: regions, branches, products and customers

use std::collections::HashMap;

use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{Branch, Customer, Product, Region};
use shared::ScopeKind;

/// Catalog lookups used to validate references before any write
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

impl CatalogService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_branch(&self, branch_id: i64) -> AppResult<Option<Branch>> {
        let branch = sqlx::query_as::<_, Branch>(
            r#"
            SELECT id, name, address, phone, region_id, active
            FROM branches
            WHERE id = $1
            "#,
        )
        .bind(branch_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(branch)
    }

    /// Branch that must exist for the operation to proceed
    pub async fn require_branch(&self, branch_id: i64) -> AppResult<Branch> {
        self.get_branch(branch_id)
            .await?
            .ok_or_else(|| AppError::InvalidReference(format!("Branch {} does not exist", branch_id)))
    }

    pub async fn get_region(&self, region_id: i64) -> AppResult<Option<Region>> {
        let region = sqlx::query_as::<_, Region>("SELECT id, name FROM regions WHERE id = $1")
            .bind(region_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(region)
    }

    pub async fn get_customer(&self, customer_id: i64) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, address, email, branch_id, active
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(customer)
    }

    /// Customer that must exist and be registered at `branch_id`
    pub async fn require_customer_of_branch(
        &self,
        customer_id: i64,
        branch_id: i64,
    ) -> AppResult<Customer> {
        let customer = self.get_customer(customer_id).await?.ok_or_else(|| {
            AppError::InvalidReference(format!("Customer {} does not exist", customer_id))
        })?;

        if customer.branch_id != branch_id {
            return Err(AppError::InvalidReference(format!(
                "Customer {} does not belong to branch {}",
                customer_id, branch_id
            )));
        }

        Ok(customer)
    }

    pub async fn get_product(&self, product_id: i64) -> AppResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category_id, unit_price, active
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(product)
    }

    pub async fn require_product(&self, product_id: i64) -> AppResult<Product> {
        self.get_product(product_id).await?.ok_or_else(|| {
            AppError::InvalidReference(format!("Product {} does not exist", product_id))
        })
    }

    /// Products keyed by id; unknown ids are simply absent
    pub async fn products_by_ids(&self, product_ids: &[i64]) -> AppResult<HashMap<i64, Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category_id, unit_price, active
            FROM products
            WHERE id = ANY($1)
            "#,
        )
        .bind(product_ids)
        .fetch_all(&self.db)
        .await?;

        Ok(products.into_iter().map(|p| (p.id, p)).collect())
    }

    /// Fail with `InvalidReference` unless the report scope entity exists
    pub async fn require_scope(&self, scope: ScopeKind, scope_id: i64) -> AppResult<()> {
        let exists = match scope {
            ScopeKind::Region => self.get_region(scope_id).await?.is_some(),
            ScopeKind::Branch => self.get_branch(scope_id).await?.is_some(),
        };

        if !exists {
            return Err(AppError::InvalidReference(format!(
                "{} {} does not exist",
                scope, scope_id
            )));
        }
        Ok(())
    }
}
