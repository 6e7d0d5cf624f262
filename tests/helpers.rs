#![allow(dead_code)]

use rust_decimal::Decimal;
use smartsupply::config::DatabaseConfig;
use smartsupply::database::{create_pool, run_migrations};
use smartsupply::models::*;
use smartsupply::repositories::*;
use smartsupply::InventoryLedger;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

/// Test ledger over a freshly migrated database
pub struct TestLedger {
    pub pool: SqlitePool,
    pub ledger: Arc<InventoryLedger>,
    pub product_repo: Arc<ProductRepository>,
    pub sale_repo: Arc<SaleRepository>,
    pub report_repo: Arc<ReportRepository>,
    // Keeps an on-disk database alive until the test ends
    _dir: Option<TempDir>,
}

impl TestLedger {
    /// Ledger over a private in-memory database
    pub async fn in_memory() -> Self {
        Self::with_config(DatabaseConfig::in_memory(), None).await
    }

    /// Ledger over a WAL database file in a temporary directory, with a real
    /// multi-connection pool so concurrent callers actually race
    pub async fn on_disk(max_connections: u32) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("ledger.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            max_connections,
            busy_timeout_secs: 30,
            ..DatabaseConfig::default()
        };

        Self::with_config(config, Some(dir)).await
    }

    async fn with_config(config: DatabaseConfig, dir: Option<TempDir>) -> Self {
        let pool = create_pool(&config)
            .await
            .expect("Failed to create test database pool");

        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let product_repo = Arc::new(ProductRepository::new(pool.clone()));
        let sale_repo = Arc::new(SaleRepository::new(pool.clone()));
        let report_repo = Arc::new(ReportRepository::new(pool.clone()));
        let ledger = Arc::new(InventoryLedger::new(
            product_repo.clone(),
            sale_repo.clone(),
            report_repo.clone(),
        ));

        Self {
            pool,
            ledger,
            product_repo,
            sale_repo,
            report_repo,
            _dir: dir,
        }
    }

    /// Add a product, panicking on failure
    pub async fn add(&self, name: &str, price: Decimal, stock: i64) -> ProductId {
        self.ledger
            .add_product(name, price, stock)
            .await
            .expect("Failed to add test product")
    }

    /// Current stock of a product
    pub async fn stock_of(&self, product_id: ProductId) -> i64 {
        self.ledger
            .get_product(product_id)
            .await
            .expect("Product should exist")
            .stock
    }

    /// Number of recorded sales
    pub async fn sale_count(&self) -> i64 {
        self.sale_repo.count().await.expect("Failed to count sales")
    }
}

/// Whole-unit decimal, e.g. `money(100)` is 100
pub fn money(units: i64) -> Decimal {
    Decimal::new(units, 0)
}

/// Decimal with two fractional digits, e.g. `cents(1999)` is 19.99
pub fn cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Assert that two products are equal field by field
pub fn assert_products_equal(a: &Product, b: &Product) {
    assert_eq!(a.id, b.id);
    assert_eq!(a.name, b.name);
    assert_eq!(a.price, b.price);
    assert_eq!(a.stock, b.stock);
}
