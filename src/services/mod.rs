pub mod ledger_service;

pub use ledger_service::{InventoryLedger, RECENT_SALES_DASHBOARD_LIMIT, RECENT_SALES_PAGE_LIMIT};
