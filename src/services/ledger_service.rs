use crate::error::{LedgerError, LedgerResult, RepositoryError};
use crate::models::{
    DashboardSummary, InventoryValuation, NewProduct, Product, ProductId, ProductSalesSummary,
    Sale, SaleId, SaleWithProduct, SalesAnalytics,
};
use crate::repositories::{ProductRepository, ReportRepository, SaleRepository};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Recent sales shown on the dashboard
pub const RECENT_SALES_DASHBOARD_LIMIT: u32 = 5;

/// Recent sales shown next to the sale form
pub const RECENT_SALES_PAGE_LIMIT: u32 = 10;

/// Inventory ledger: owns the product catalog and sale history.
///
/// All stock mutation goes through [`InventoryLedger::record_sale`], which
/// never lets stock go negative and never leaves a sale without its stock
/// decrement (or the reverse). The ledger is cheap to share behind an `Arc`
/// and safe to call from concurrent tasks.
pub struct InventoryLedger {
    product_repo: Arc<ProductRepository>,
    sale_repo: Arc<SaleRepository>,
    report_repo: Arc<ReportRepository>,
}

impl InventoryLedger {
    pub fn new(
        product_repo: Arc<ProductRepository>,
        sale_repo: Arc<SaleRepository>,
        report_repo: Arc<ReportRepository>,
    ) -> Self {
        Self {
            product_repo,
            sale_repo,
            report_repo,
        }
    }

    /// Build a ledger with fresh repositories over one pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self::new(
            Arc::new(ProductRepository::new(pool.clone())),
            Arc::new(SaleRepository::new(pool.clone())),
            Arc::new(ReportRepository::new(pool)),
        )
    }

    /// Add a product to the catalog
    pub async fn add_product(
        &self,
        name: &str,
        price: Decimal,
        stock: i64,
    ) -> LedgerResult<ProductId> {
        let new_product = NewProduct::new(name, price, stock);
        new_product.validate()?;

        let product = self
            .product_repo
            .create(&new_product)
            .await
            .map_err(|e| {
                if matches!(e, RepositoryError::Duplicate(_)) {
                    warn!("Rejected duplicate product name: {}", name);
                }
                LedgerError::from(e)
            })?;

        info!(
            "Product added: id={}, name={}, price={}, stock={}",
            product.id, product.name, product.price, product.stock
        );

        Ok(product.id)
    }

    /// Record a sale of `quantity` units, decrementing stock atomically
    pub async fn record_sale(&self, product_id: ProductId, quantity: i64) -> LedgerResult<SaleId> {
        if quantity < 1 {
            return Err(LedgerError::validation(
                "quantity",
                format!("Quantity must be at least 1, got {}", quantity),
            ));
        }

        let (sale, product) = self
            .sale_repo
            .record_sale(product_id, quantity)
            .await
            .map_err(|e| {
                match &e {
                    RepositoryError::InsufficientStock { available, .. } => warn!(
                        "Sale rejected: product={}, requested={}, available={}",
                        product_id, quantity, available
                    ),
                    RepositoryError::NotFound { .. } => {
                        warn!("Sale rejected: product={} does not exist", product_id)
                    }
                    _ => {}
                }
                LedgerError::from(e)
            })?;

        info!(
            "Sale recorded: id={}, product={}, quantity={}, total={}, stock_left={}",
            sale.id, product.name, sale.quantity, sale.total, product.stock
        );

        Ok(sale.id)
    }

    /// Look up a single product
    pub async fn get_product(&self, product_id: ProductId) -> LedgerResult<Product> {
        self.product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| LedgerError::product_not_found(product_id))
    }

    /// Look up a product by exact name
    pub async fn find_product_by_name(&self, name: &str) -> LedgerResult<Option<Product>> {
        Ok(self.product_repo.find_by_name(name).await?)
    }

    /// Look up a single sale
    pub async fn get_sale(&self, sale_id: SaleId) -> LedgerResult<Sale> {
        self.sale_repo
            .find_by_id(sale_id)
            .await?
            .ok_or(LedgerError::NotFound {
                entity: "sale",
                id: sale_id.0,
            })
    }

    /// All products, ordered by name
    pub async fn list_products(&self) -> LedgerResult<Vec<Product>> {
        let products = self.product_repo.list_all().await?;
        debug!("Listed {} products", products.len());
        Ok(products)
    }

    /// Products that can currently be sold (stock > 0), ordered by name
    pub async fn list_sellable_products(&self) -> LedgerResult<Vec<Product>> {
        Ok(self.product_repo.list_in_stock().await?)
    }

    /// Most recent sales with their products, newest first, at most `limit`
    pub async fn list_recent_sales(&self, limit: u32) -> LedgerResult<Vec<SaleWithProduct>> {
        let sales = self.sale_repo.find_recent_with_products(limit).await?;
        debug!("Listed {} recent sales (limit {})", sales.len(), limit);
        Ok(sales)
    }

    /// Sale history of one product, newest first
    pub async fn list_product_sales(&self, product_id: ProductId) -> LedgerResult<Vec<Sale>> {
        // Distinguish "no sales" from "no such product"
        self.get_product(product_id).await?;
        Ok(self.sale_repo.find_by_product(product_id).await?)
    }

    /// Units sold and revenue per product, highest revenue first.
    /// Products without sales are omitted.
    pub async fn aggregate_sales_by_product(&self) -> LedgerResult<Vec<ProductSalesSummary>> {
        Ok(self.report_repo.sales_by_product().await?)
    }

    /// Headline counts; zero on an empty ledger
    pub async fn dashboard_summary(&self) -> LedgerResult<DashboardSummary> {
        Ok(self.report_repo.dashboard_summary().await?)
    }

    /// Stock value per product and for the whole catalog
    pub async fn inventory_valuation(&self) -> LedgerResult<InventoryValuation> {
        let products = self.product_repo.list_all().await?;
        InventoryValuation::from_products(products)
    }

    /// Revenue totals, units sold and average price per unit
    pub async fn sales_analytics(&self) -> LedgerResult<SalesAnalytics> {
        let summaries = self.report_repo.sales_by_product().await?;
        SalesAnalytics::from_summaries(summaries)
    }
}
