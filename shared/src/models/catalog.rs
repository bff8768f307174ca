//! Master data the ledger reads but never writes

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Corporate region grouping several branches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Region {
    pub id: i64,
    pub name: String,
}

/// A store location holding its own inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub region_id: Option<i64>,
    pub active: bool,
}

/// A sellable product; `unit_price` is the current catalog price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub unit_price: Decimal,
    pub active: bool,
}

/// A customer registered at a branch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub branch_id: i64,
    pub active: bool,
}
