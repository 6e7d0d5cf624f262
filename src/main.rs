//! SmartSupply ledger command line
//!
//! Runs one ledger operation against the configured database and prints the
//! result as JSON on stdout:
//! - `dashboard`, `products`, `sellable`, `report`, `valuation`, `analytics`
//! - `add-product <name> <price> <stock>`
//! - `sell <product-id> <quantity>`
//! - `sales [limit]`, `product-sales <product-id>`

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use smartsupply::config::AppConfig;
use smartsupply::error::{AppError, AppResult};
use smartsupply::models::ProductId;
use smartsupply::telemetry;
use smartsupply::{AppState, InventoryLedger};
use std::str::FromStr;
use tracing::{error, info};

const USAGE: &str = "usage: smartsupply <dashboard|products|sellable|add-product NAME PRICE STOCK|sell PRODUCT_ID QUANTITY|sales [LIMIT]|product-sales PRODUCT_ID|report|valuation|analytics>";

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Err(e) = run(args).await {
        error!("{}", e);
        eprintln!("{}", e);
        if matches!(e, AppError::Usage(_)) {
            eprintln!("{}", USAGE);
        }
        std::process::exit(e.exit_code());
    }
}

async fn run(args: Vec<String>) -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(AppError::Config)?;

    telemetry::init_tracing(&config);

    info!("Environment: {}", config.environment);
    info!("Database: {}", config.database_url());

    let state = AppState::connect(&config).await?;
    info!("Database ready, migrations applied");

    let output = execute(&state.ledger, &config, &args).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

async fn execute(
    ledger: &InventoryLedger,
    config: &AppConfig,
    args: &[String],
) -> AppResult<serde_json::Value> {
    let command = args
        .first()
        .ok_or_else(|| AppError::Usage("missing command".into()))?;

    let value = match command.as_str() {
        "dashboard" => {
            let summary = ledger.dashboard_summary().await?;
            let recent = ledger
                .list_recent_sales(smartsupply::services::RECENT_SALES_DASHBOARD_LIMIT)
                .await?;
            json!({ "summary": summary, "recent_sales": recent })
        }
        "products" => to_json(ledger.list_products().await?)?,
        "sellable" => to_json(ledger.list_sellable_products().await?)?,
        "add-product" => {
            let name = arg(args, 1, "NAME")?;
            let price: Decimal = parse_arg(args, 2, "PRICE")?;
            let stock: i64 = parse_arg(args, 3, "STOCK")?;
            let product_id = ledger.add_product(name, price, stock).await?;
            json!({ "product_id": product_id })
        }
        "sell" => {
            let product_id = ProductId(parse_arg(args, 1, "PRODUCT_ID")?);
            let quantity: i64 = parse_arg(args, 2, "QUANTITY")?;
            let sale_id = ledger.record_sale(product_id, quantity).await?;
            to_json(ledger.get_sale(sale_id).await?)?
        }
        "sales" => {
            let limit = match args.get(1) {
                Some(_) => parse_arg(args, 1, "LIMIT")?,
                None => config.recent_sales_limit,
            };
            to_json(ledger.list_recent_sales(limit).await?)?
        }
        "product-sales" => {
            let product_id = ProductId(parse_arg(args, 1, "PRODUCT_ID")?);
            to_json(ledger.list_product_sales(product_id).await?)?
        }
        "report" => to_json(ledger.aggregate_sales_by_product().await?)?,
        "valuation" => to_json(ledger.inventory_valuation().await?)?,
        "analytics" => to_json(ledger.sales_analytics().await?)?,
        other => return Err(AppError::Usage(format!("unknown command: {}", other))),
    };

    Ok(value)
}

fn to_json<T: Serialize>(value: T) -> AppResult<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> AppResult<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| AppError::Usage(format!("missing argument {}", name)))
}

fn parse_arg<T: FromStr>(args: &[String], index: usize, name: &str) -> AppResult<T> {
    let raw = arg(args, index, name)?;
    raw.parse::<T>()
        .map_err(|_| AppError::Usage(format!("invalid {}: {}", name, raw)))
}
