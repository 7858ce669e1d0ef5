//! Test utilities for SQL emission validation.
//!
//! Provides helpers for validating that emitted SQL is syntactically correct
//! using sqlparser-rs for roundtrip validation. The sqlparser Snowflake
//! dialect only understands part of Snowflake DDL (`CREATE SCHEMA`,
//! `DROP ROLE`, ...), so callers use it where it applies and fall back to
//! snapshots elsewhere.

use sqlparser::dialect::SnowflakeDialect;
use sqlparser::parser::Parser;

/// Validates that a SQL string parses under the Snowflake dialect.
///
/// # Example
///
/// ```ignore
/// use crate::sql::test_utils::validate_sql;
///
/// validate_sql(r#"DROP SCHEMA IF EXISTS "DB"."S""#).unwrap();
/// ```
pub fn validate_sql(sql: &str) -> Result<(), String> {
    Parser::parse_sql(&SnowflakeDialect {}, sql)
        .map(|_| ())
        .map_err(|e| format!("Invalid Snowflake SQL: {}\nSQL: {}", e, sql))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_sql() {
        validate_sql("DROP ROLE \"R\"").unwrap();
        validate_sql("CREATE SCHEMA \"DB\".\"S\"").unwrap();
    }

    #[test]
    fn test_validate_invalid_sql() {
        assert!(validate_sql("DORP ROLE \"R\"").is_err());
    }
}
