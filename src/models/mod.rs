//! Domain models for the SmartSupply ledger.
//!
//! This module contains the database-backed product and sale records and
//! the aggregated read models built from them.

pub mod money;
pub mod product;
pub mod report;
pub mod sale;

// Re-export all models for convenient access
pub use product::{NewProduct, Product, ProductId};
pub use report::{
    DashboardSummary, InventoryValuation, ProductSalesSummary, ProductValuation, SalesAnalytics,
};
pub use sale::{Sale, SaleId, SaleWithProduct};
