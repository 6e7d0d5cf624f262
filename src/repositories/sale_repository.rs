//! Repository for sale recording and sale history

use crate::error::RepositoryError;
use crate::models::{money, Product, ProductId, Sale, SaleId, SaleWithProduct};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a sale and decrement the product's stock as one transaction.
    ///
    /// The decrement is a conditional update (`stock >= quantity`), so the
    /// feasibility check and the write see the same row version and two
    /// concurrent sales can never both take the last unit. If the update
    /// matches nothing the product is read inside the same transaction to
    /// tell a missing product from a short one. Any early return drops the
    /// transaction, which rolls it back.
    ///
    /// Returns the new sale and the product as it stands after the sale.
    pub async fn record_sale(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(Sale, Product), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET stock = stock - ?1
            WHERE id = ?2 AND stock >= ?1
            RETURNING id, name, price, stock
            "#,
        )
        .bind(quantity)
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;

        let product = match updated {
            Some(product) => product,
            None => {
                let available = sqlx::query_scalar::<_, i64>(
                    "SELECT stock FROM products WHERE id = ?1",
                )
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?;

                return Err(match available {
                    Some(available) => RepositoryError::InsufficientStock {
                        product_id,
                        requested: quantity,
                        available,
                    },
                    None => RepositoryError::NotFound {
                        entity: "product",
                        id: product_id.0,
                    },
                });
            }
        };

        let total = product
            .price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| {
                RepositoryError::InvalidInput(format!(
                    "Sale total of {} x {} is out of range",
                    quantity, product.price
                ))
            })?;

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (product_id, quantity, total, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, product_id, quantity, total, created_at
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(money::to_db(total))
        .bind(chrono::Utc::now().naive_utc())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((sale, product))
    }

    /// Find a sale by id
    pub async fn find_by_id(&self, id: SaleId) -> Result<Option<Sale>, RepositoryError> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, product_id, quantity, total, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// All sales of one product, newest first
    pub async fn find_by_product(&self, product_id: ProductId) -> Result<Vec<Sale>, RepositoryError> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, product_id, quantity, total, created_at
            FROM sales
            WHERE product_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Most recent sales joined with their products, newest first
    pub async fn find_recent_with_products(
        &self,
        limit: u32,
    ) -> Result<Vec<SaleWithProduct>, RepositoryError> {
        let sales = sqlx::query_as::<_, SaleWithProduct>(
            r#"
            SELECT
                s.id AS sale_id,
                s.product_id,
                s.quantity,
                s.total,
                s.created_at,
                p.name AS product_name,
                p.price AS product_price,
                p.stock AS product_stock
            FROM sales s
            JOIN products p ON s.product_id = p.id
            ORDER BY s.created_at DESC, s.id DESC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Number of recorded sales
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
