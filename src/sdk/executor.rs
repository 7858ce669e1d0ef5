//! Executor contract.
//!
//! The SDK never opens connections itself. Statements are handed to a
//! [`SqlExecutor`], which owns connection management, retries and driver
//! type decoding, and returns rows as JSON objects keyed by column name.
//!
//! # Example
//!
//! ```ignore
//! use snowflake_sdk::sdk::executor::{ExecError, Row, SqlExecutor};
//!
//! struct Driver { /* connection pool */ }
//!
//! #[async_trait::async_trait]
//! impl SqlExecutor for Driver {
//!     async fn exec(&self, sql: &str) -> Result<u64, ExecError> { todo!() }
//!     async fn query(&self, sql: &str) -> Result<Vec<Row>, ExecError> { todo!() }
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// One result row: column name to value.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Errors reported by an executor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// A single-row query returned nothing.
    #[error("query returned no rows")]
    NoRows,

    /// Any other driver failure, forwarded unchanged.
    #[error("driver error: {0}")]
    Driver(String),
}

impl ExecError {
    pub fn is_no_rows(&self) -> bool {
        matches!(self, ExecError::NoRows)
    }
}

/// Runs SQL text against Snowflake.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Run a statement, returning the number of affected rows.
    async fn exec(&self, sql: &str) -> Result<u64, ExecError>;

    /// Run a query, returning all rows.
    async fn query(&self, sql: &str) -> Result<Vec<Row>, ExecError>;

    /// Run a query expected to return exactly one row.
    ///
    /// Default implementation takes the first row of [`SqlExecutor::query`]
    /// and reports [`ExecError::NoRows`] when there is none.
    async fn query_one(&self, sql: &str) -> Result<Row, ExecError> {
        self.query(sql).await?.into_iter().next().ok_or(ExecError::NoRows)
    }

    /// Run independent statements concurrently.
    ///
    /// Default implementation runs them in parallel using `join_all` and fails
    /// if any statement failed. A failure does not undo the others, which may
    /// have completed in any order.
    async fn exec_batch(&self, statements: &[String]) -> Result<u64, ExecError> {
        let futures: Vec<_> = statements.iter().map(|sql| self.exec(sql)).collect();
        let results = futures::future::join_all(futures).await;
        let mut total = 0;
        for affected in results {
            total += affected?;
        }
        Ok(total)
    }
}
