use crate::models::money;
use crate::models::{Product, ProductId};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;

/// Surrogate sale identifier assigned by the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct SaleId(pub i64);

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable record of units sold against a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub product_id: ProductId,
    pub quantity: i64,
    /// quantity * unit price at the moment of sale; never recomputed
    pub total: Decimal,
    pub created_at: NaiveDateTime,
}

impl Sale {
    /// Unit price captured by this sale
    pub fn unit_price(&self) -> Option<Decimal> {
        self.total.checked_div(Decimal::from(self.quantity))
    }
}

impl<'r> FromRow<'r, SqliteRow> for Sale {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            product_id: row.try_get("product_id")?,
            quantity: row.try_get("quantity")?,
            total: money::get(row, "total")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// A sale joined with the product it was sold against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleWithProduct {
    pub sale: Sale,
    pub product: Product,
}

impl<'r> FromRow<'r, SqliteRow> for SaleWithProduct {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let product_id: ProductId = row.try_get("product_id")?;

        Ok(Self {
            sale: Sale {
                id: row.try_get("sale_id")?,
                product_id,
                quantity: row.try_get("quantity")?,
                total: money::get(row, "total")?,
                created_at: row.try_get("created_at")?,
            },
            product: Product {
                id: product_id,
                name: row.try_get("product_name")?,
                price: money::get(row, "product_price")?,
                stock: row.try_get("product_stock")?,
            },
        })
    }
}
