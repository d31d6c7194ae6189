//! Database trait and shared result types for askdb execution backends.
//!
//! This crate defines the abstract interface the generator, evaluation
//! driver, and front ends use to run SQL, keeping the concrete engine
//! (DuckDB) behind a seam.

mod error;
mod types;

pub use error::BackendError;
pub use types::{QueryResult, Value};

use async_trait::async_trait;

/// Abstract interface to the relational store askdb runs SQL against.
///
/// Backends are responsible for:
/// - Executing arbitrary SQL statements and materializing full result sets
/// - Converting every engine fault into an error value (nothing panics
///   across this boundary)
/// - Describing the current schema for prompt construction
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a single SQL statement and return the materialized result.
    ///
    /// Column order and row order are preserved exactly as emitted by the
    /// engine. On failure the error carries the engine's diagnostic text
    /// verbatim. Statement kind is not restricted; DDL and DML simply
    /// produce empty results.
    async fn execute_sql(&self, sql: &str) -> Result<QueryResult, BackendError>;

    /// Human-readable schema listing, one `table(col1, col2, ...)` line per
    /// table, in the engine's listing order. Used to build prompts.
    async fn describe_schema(&self) -> Result<String, BackendError>;
}
