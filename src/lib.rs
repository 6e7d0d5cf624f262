//! SmartSupply Ledger Library
//!
//! Inventory and sales ledger for the SmartSupply dashboard. The presentation
//! layer talks only to [`InventoryLedger`]; storage stays behind the
//! repositories.

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;
pub mod telemetry;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult, LedgerError, LedgerResult};
pub use services::InventoryLedger;

use database::Database;
use std::sync::Arc;

/// Application state: the database handle and the ledger built on it
pub struct AppState {
    pub database: Database,
    pub ledger: Arc<InventoryLedger>,
}

impl AppState {
    /// Create a new AppState over an already migrated database
    pub fn new(database: Database) -> Self {
        let ledger = InventoryLedger::from_pool(database.pool().clone());

        Self {
            database,
            ledger: Arc::new(ledger),
        }
    }

    /// Connect, migrate and build the ledger from configuration
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        let database = Database::connect(&config.database).await?;
        Ok(Self::new(database))
    }
}
