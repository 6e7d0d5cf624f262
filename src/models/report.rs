//! Aggregated read models for dashboards and reports.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Units and revenue for one product across all of its sales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSalesSummary {
    pub product_id: ProductId,
    pub product_name: String,
    pub units_sold: i64,
    pub revenue: Decimal,
}

/// Headline counts for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub product_count: i64,
    pub total_stock_units: i64,
    pub sale_count: i64,
    pub total_revenue: Decimal,
}

/// Stock value of a single product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductValuation {
    pub product: Product,
    pub value: Decimal,
}

/// Stock value of the whole catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryValuation {
    pub products: Vec<ProductValuation>,
    pub total_value: Decimal,
}

impl InventoryValuation {
    /// Value every product and total them; fails if the catalog total
    /// leaves the `Decimal` range.
    pub fn from_products(products: Vec<Product>) -> LedgerResult<Self> {
        let products: Vec<ProductValuation> = products
            .into_iter()
            .map(|product| ProductValuation {
                value: product.inventory_value(),
                product,
            })
            .collect();

        let total_value = products
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.value))
            .ok_or(LedgerError::Overflow {
                quantity: "inventory value",
            })?;

        Ok(Self {
            products,
            total_value,
        })
    }
}

/// Revenue analytics over all recorded sales
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesAnalytics {
    pub total_revenue: Decimal,
    pub units_sold: i64,
    /// total_revenue / units_sold, zero when nothing has been sold
    pub average_unit_price: Decimal,
    pub products: Vec<ProductSalesSummary>,
}

impl SalesAnalytics {
    pub fn from_summaries(products: Vec<ProductSalesSummary>) -> LedgerResult<Self> {
        let total_revenue = products
            .iter()
            .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.revenue))
            .ok_or(LedgerError::Overflow {
                quantity: "total revenue",
            })?;
        let units_sold = products
            .iter()
            .try_fold(0i64, |acc, p| acc.checked_add(p.units_sold))
            .ok_or(LedgerError::Overflow {
                quantity: "units sold",
            })?;

        let average_unit_price = if units_sold > 0 {
            total_revenue
                .checked_div(Decimal::from(units_sold))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        Ok(Self {
            total_revenue,
            units_sold,
            average_unit_price,
            products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64, name: &str, units: i64, revenue: Decimal) -> ProductSalesSummary {
        ProductSalesSummary {
            product_id: ProductId(id),
            product_name: name.to_string(),
            units_sold: units,
            revenue,
        }
    }

    #[test]
    fn test_analytics_average_price() {
        let analytics = SalesAnalytics::from_summaries(vec![
            summary(1, "Widget", 3, Decimal::new(300, 0)),
            summary(2, "Gadget", 1, Decimal::new(100, 0)),
        ])
        .unwrap();

        assert_eq!(analytics.total_revenue, Decimal::new(400, 0));
        assert_eq!(analytics.units_sold, 4);
        assert_eq!(analytics.average_unit_price, Decimal::new(100, 0));
    }

    #[test]
    fn test_analytics_empty() {
        let analytics = SalesAnalytics::from_summaries(Vec::new()).unwrap();
        assert_eq!(analytics, SalesAnalytics::default());
    }

    #[test]
    fn test_valuation_total() {
        let valuation = InventoryValuation::from_products(vec![
            Product {
                id: ProductId(1),
                name: "Gadget".to_string(),
                price: Decimal::new(5000, 2),
                stock: 0,
            },
            Product {
                id: ProductId(2),
                name: "Widget".to_string(),
                price: Decimal::new(10000, 2),
                stock: 7,
            },
        ])
        .unwrap();

        assert_eq!(valuation.products.len(), 2);
        assert_eq!(valuation.products[0].value, Decimal::ZERO);
        assert_eq!(valuation.total_value, Decimal::new(700, 0));
    }

    #[test]
    fn test_analytics_units_overflow_is_an_error() {
        let err = SalesAnalytics::from_summaries(vec![
            summary(1, "Widget", i64::MAX, Decimal::ZERO),
            summary(2, "Gadget", 1, Decimal::ZERO),
        ])
        .unwrap_err();

        assert!(matches!(err, LedgerError::Overflow { quantity: "units sold" }));
    }

    #[test]
    fn test_analytics_revenue_overflow_is_an_error() {
        let err = SalesAnalytics::from_summaries(vec![
            summary(1, "Widget", 1, Decimal::MAX),
            summary(2, "Gadget", 1, Decimal::MAX),
        ])
        .unwrap_err();

        assert!(matches!(err, LedgerError::Overflow { quantity: "total revenue" }));
    }

    #[test]
    fn test_valuation_overflow_is_an_error() {
        let product = |id: i64| Product {
            id: ProductId(id),
            name: format!("Bulk {id}"),
            price: Decimal::MAX,
            stock: 1,
        };

        let err = InventoryValuation::from_products(vec![product(1), product(2)]).unwrap_err();
        assert!(matches!(err, LedgerError::Overflow { quantity: "inventory value" }));
    }
}
