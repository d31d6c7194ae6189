//! Common result types shared by all backends.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// A single scalar cell produced by a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Textual rendering used for result comparison and table display.
    pub fn render(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Text(v) => v.clone(),
        }
    }

    /// Numeric view of the cell, if it has one. Text cells are parsed,
    /// null cells have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Null => None,
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(v) => v.trim().parse().ok(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Text(v) => serializer.serialize_str(v),
        }
    }
}

/// Materialized result of one SQL statement.
///
/// Column order and row order are exactly as emitted by the engine.
/// Immutable once produced; owned by whichever caller requested execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Column names, in output order.
    pub columns: Vec<String>,

    /// Row-major cells. Every row has one cell per column.
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of the last column, top to bottom.
    ///
    /// `None` when the result has no columns (or a row with no cells), so
    /// callers can treat a column-less shape as a non-match instead of
    /// indexing out of bounds.
    pub fn last_column(&self) -> Option<Vec<&Value>> {
        self.rows.iter().map(|row| row.last()).collect()
    }

    /// Rows as JSON objects keyed by column name. This is the `result`
    /// shape of the HTTP API's query response.
    pub fn to_row_objects(&self) -> Vec<JsonValue> {
        self.rows
            .iter()
            .map(|row| {
                let mut object = Map::with_capacity(self.columns.len());
                for (name, cell) in self.columns.iter().zip(row) {
                    let json = serde_json::to_value(cell).unwrap_or(JsonValue::Null);
                    object.insert(name.clone(), json);
                }
                JsonValue::Object(object)
            })
            .collect()
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "(no results)");
        }

        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(Value::render).collect())
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(String::len).collect();
        for row in &rendered {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len());
                }
            }
        }

        for (i, name) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{:width$}", name, width = widths[i])?;
        }
        writeln!(f)?;

        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(f, "{}", "-".repeat(total))?;

        for row in &rendered {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:width$}", cell, width = widths.get(i).copied().unwrap_or(0))?;
            }
            writeln!(f)?;
        }

        let plural = if self.rows.len() == 1 { "" } else { "s" };
        write!(f, "({} row{})", self.rows.len(), plural)
    }
}
