//! Aggregate queries over products and sales.
//!
//! Money columns are decimal text, so revenue is summed in Rust with exact
//! `Decimal` arithmetic instead of SQLite's floating point `SUM`.

use crate::error::RepositoryError;
use crate::models::{money, DashboardSummary, ProductId, ProductSalesSummary};
use rust_decimal::Decimal;
use sqlx::{Row, SqliteConnection, SqlitePool};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Headline counts, all read from one snapshot.
    ///
    /// Sums are taken in Rust with checked arithmetic, so empty tables give
    /// zero and totals past `i64` give [`RepositoryError::Overflow`].
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let stocks = sqlx::query_scalar::<_, i64>("SELECT stock FROM products")
            .fetch_all(&mut *tx)
            .await?;

        let sale_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sales")
            .fetch_one(&mut *tx)
            .await?;

        let total_revenue = sum_sale_totals(&mut *tx).await?;

        tx.commit().await?;

        let total_stock_units = stocks
            .iter()
            .try_fold(0i64, |acc, stock| acc.checked_add(*stock))
            .ok_or(RepositoryError::Overflow("total stock units"))?;

        Ok(DashboardSummary {
            product_count: stocks.len() as i64,
            total_stock_units,
            sale_count,
            total_revenue,
        })
    }

    /// Units and revenue per product, highest revenue first.
    ///
    /// Inner join: products that were never sold do not appear. Ties on
    /// revenue are broken by product name.
    pub async fn sales_by_product(&self) -> Result<Vec<ProductSalesSummary>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id AS product_id, p.name AS product_name, s.quantity, s.total
            FROM sales s
            JOIN products p ON s.product_id = p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_product: HashMap<ProductId, ProductSalesSummary> = HashMap::new();
        for row in &rows {
            let product_id: ProductId = row.try_get("product_id")?;
            let quantity: i64 = row.try_get("quantity")?;
            let total = money::get(row, "total")?;

            let entry = match by_product.entry(product_id) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => e.insert(ProductSalesSummary {
                    product_id,
                    product_name: row.try_get("product_name")?,
                    units_sold: 0,
                    revenue: Decimal::ZERO,
                }),
            };
            entry.units_sold = entry
                .units_sold
                .checked_add(quantity)
                .ok_or(RepositoryError::Overflow("units sold"))?;
            entry.revenue = entry
                .revenue
                .checked_add(total)
                .ok_or(RepositoryError::Overflow("revenue"))?;
        }

        let mut summaries: Vec<ProductSalesSummary> = by_product.into_values().collect();
        summaries.sort_by(|a, b| {
            b.revenue
                .cmp(&a.revenue)
                .then_with(|| a.product_name.cmp(&b.product_name))
                .then_with(|| a.product_id.0.cmp(&b.product_id.0))
        });

        Ok(summaries)
    }
}

async fn sum_sale_totals(conn: &mut SqliteConnection) -> Result<Decimal, RepositoryError> {
    let totals = sqlx::query_scalar::<_, String>("SELECT total FROM sales")
        .fetch_all(&mut *conn)
        .await?;

    let mut revenue = Decimal::ZERO;
    for raw in &totals {
        revenue = revenue
            .checked_add(money::parse(raw, "total")?)
            .ok_or(RepositoryError::Overflow("total revenue"))?;
    }

    Ok(revenue)
}
