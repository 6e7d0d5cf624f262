use crate::error::LedgerError;
use crate::models::money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;

/// Surrogate product identifier assigned by the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: i64,
}

impl Product {
    /// Value of the units on hand (price * stock)
    pub fn inventory_value(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.stock))
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

impl<'r> FromRow<'r, SqliteRow> for Product {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: money::get(row, "price")?,
            stock: row.try_get("stock")?,
        })
    }
}

/// Input for creating a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: i64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: Decimal, stock: i64) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }

    /// Validate name, price and stock before touching storage.
    ///
    /// The name is kept exactly as given; it only has to contain something
    /// other than whitespace.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::validation("name", "Product name must not be empty"));
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(LedgerError::validation(
                "price",
                format!("Price must not be negative, got {}", self.price),
            ));
        }
        if self.stock < 0 {
            return Err(LedgerError::validation(
                "stock",
                format!("Stock must not be negative, got {}", self.stock),
            ));
        }
        if self.price.checked_mul(Decimal::from(self.stock)).is_none() {
            return Err(LedgerError::validation(
                "price",
                format!("Inventory value of {} x {} is out of range", self.price, self.stock),
            ));
        }
        Ok(())
    }
}
