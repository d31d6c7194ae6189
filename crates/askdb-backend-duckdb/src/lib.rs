//! DuckDB backend implementation for askdb.

use anyhow::Context;
use arrow::array::{Array, ArrayRef, AsArray, RecordBatch};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use askdb_backend::{BackendError, Database, QueryResult, Value};
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// DuckDB backend for askdb.
///
/// Wraps a DuckDB connection and implements the Database trait.
/// DuckDB operations are synchronous, so they're wrapped in spawn_blocking.
/// Uses Arc<Mutex<Connection>> since Connection is not Sync.
pub struct DuckDbBackend {
    connection: Arc<Mutex<Connection>>,
}

impl DuckDbBackend {
    /// Open (or create) a database file at the given path.
    ///
    /// The connection is owned for the backend's lifetime and closed when the
    /// backend is dropped; each front end opens exactly one per session.
    pub async fn open(database_path: &Path) -> Result<Self, BackendError> {
        let database_path = database_path.to_owned();

        // Run blocking DuckDB operations in spawn_blocking
        let connection = tokio::task::spawn_blocking(move || {
            // Create parent directory if needed
            if let Some(parent) = database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create directory: {:?}", parent))?;
                }
            }

            let connection = Connection::open(&database_path)
                .with_context(|| format!("Failed to open DuckDB database: {:?}", database_path))?;

            Ok::<_, anyhow::Error>(Arc::new(Mutex::new(connection)))
        })
        .await
        .map_err(|e| BackendError::connection_failed(e.to_string()))?
        .map_err(|e| BackendError::connection_failed(e.to_string()))?;

        Ok(Self { connection })
    }

    /// Open a transient in-memory database. Used by tests and nothing else
    /// survives the process.
    pub async fn open_in_memory() -> Result<Self, BackendError> {
        let connection = tokio::task::spawn_blocking(|| {
            let connection = Connection::open_in_memory()
                .context("Failed to open in-memory DuckDB database")?;
            Ok::<_, anyhow::Error>(Arc::new(Mutex::new(connection)))
        })
        .await
        .map_err(|e| BackendError::connection_failed(e.to_string()))?
        .map_err(|e| BackendError::connection_failed(e.to_string()))?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute_sql(&self, sql: &str) -> Result<QueryResult, BackendError> {
        let connection = Arc::clone(&self.connection);
        let sql = sql.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = connection.lock().unwrap();
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| BackendError::execution_failed(e.to_string()))?;

            let batches: Vec<RecordBatch> = stmt
                .query_arrow([])
                .map_err(|e| BackendError::execution_failed(e.to_string()))?
                .collect();

            batches_to_result(&batches)
        })
        .await
        .map_err(|e| BackendError::Other(e.into()))?
    }

    async fn describe_schema(&self) -> Result<String, BackendError> {
        let connection = Arc::clone(&self.connection);

        tokio::task::spawn_blocking(move || {
            let conn = connection.lock().unwrap();

            let mut stmt = conn
                .prepare(
                    "SELECT table_name FROM information_schema.tables \
                     WHERE table_schema = 'main' ORDER BY table_name",
                )
                .map_err(|e| BackendError::schema_introspection(e.to_string()))?;
            let tables = stmt
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(|e| BackendError::schema_introspection(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| BackendError::schema_introspection(e.to_string()))?;

            let mut lines = Vec::with_capacity(tables.len());
            for table in &tables {
                let mut stmt = conn
                    .prepare(&format!("PRAGMA table_info('{}')", table))
                    .map_err(|e| BackendError::schema_introspection(e.to_string()))?;
                let columns = stmt
                    .query_map([], |row| row.get::<_, String>(1))
                    .map_err(|e| BackendError::schema_introspection(e.to_string()))?
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| BackendError::schema_introspection(e.to_string()))?;

                lines.push(format!("{}({})", table, columns.join(", ")));
            }

            Ok(lines.join("\n"))
        })
        .await
        .map_err(|e| BackendError::Other(e.into()))?
    }
}

fn batches_to_result(batches: &[RecordBatch]) -> Result<QueryResult, BackendError> {
    // A statement with no output rows yields no batches; the column names
    // are gone with them, which downstream consumers treat as empty.
    let Some(first) = batches.first() else {
        return Ok(QueryResult::default());
    };

    let columns = first
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().clone())
        .collect();

    let mut rows = Vec::new();
    for batch in batches {
        for row in 0..batch.num_rows() {
            let mut cells = Vec::with_capacity(batch.num_columns());
            for column in batch.columns() {
                cells.push(cell_value(column, row)?);
            }
            rows.push(cells);
        }
    }

    Ok(QueryResult { columns, rows })
}

fn cell_value(column: &ArrayRef, row: usize) -> Result<Value, BackendError> {
    if column.is_null(row) {
        return Ok(Value::Null);
    }

    let value = match column.data_type() {
        DataType::Int8 => Value::Int(column.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => Value::Int(column.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => Value::Int(column.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Value::Int(column.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => Value::Int(column.as_primitive::<UInt8Type>().value(row) as i64),
        DataType::UInt16 => Value::Int(column.as_primitive::<UInt16Type>().value(row) as i64),
        DataType::UInt32 => Value::Int(column.as_primitive::<UInt32Type>().value(row) as i64),
        DataType::UInt64 => Value::Int(column.as_primitive::<UInt64Type>().value(row) as i64),
        DataType::Float32 => Value::Float(column.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Value::Float(column.as_primitive::<Float64Type>().value(row)),
        DataType::Utf8 => Value::Text(column.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Value::Text(column.as_string::<i64>().value(row).to_string()),
        // Booleans, dates, timestamps, decimals (DuckDB HUGEINT sums land
        // here) and anything else render through Arrow's display formatter.
        _ => {
            let options = FormatOptions::default();
            let formatter = ArrayFormatter::try_new(column.as_ref(), &options)
                .map_err(|e| BackendError::execution_failed(e.to_string()))?;
            Value::Text(formatter.value(row).to_string())
        }
    };

    Ok(value)
}
