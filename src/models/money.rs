//! Exact decimal money stored as canonical text.
//!
//! SQLite has no decimal type and its numeric affinity would round through
//! floating point, so prices and totals live in TEXT columns and are parsed
//! back into `Decimal` here.

use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

/// Encode a decimal for storage. Negative zero is stored as plain zero.
pub fn to_db(value: Decimal) -> String {
    if value.is_zero() {
        value.abs().to_string()
    } else {
        value.to_string()
    }
}

/// Parse a stored decimal string
pub fn parse(raw: &str, column: &str) -> Result<Decimal, sqlx::Error> {
    Decimal::from_str(raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Read a decimal column from a row
pub fn get(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    parse(&raw, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_keeps_scale() {
        let price = Decimal::new(19999, 2);
        let stored = to_db(price);
        assert_eq!(stored, "199.99");
        assert_eq!(parse(&stored, "price").unwrap(), price);
    }

    #[test]
    fn test_negative_zero_stored_unsigned() {
        assert_eq!(to_db(-Decimal::new(0, 2)), "0.00");
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let err = parse("twelve", "total").unwrap_err();
        assert!(matches!(err, sqlx::Error::ColumnDecode { ref index, .. } if index == "total"));
    }
}
