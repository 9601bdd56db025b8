//! Row model for query results.
//!
//! Mirrors the remote client's result API: a grid of dynamically typed
//! cells read one at a time through typed accessors that fail per cell.

use super::error::StoreError;

/// A single dynamically typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// The rows returned by one `select`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ResultSet {
    /// Create a result set from column names and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// A result set with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Column names in select order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn cell(&self, row: usize, column: usize) -> Result<&Value, StoreError> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .ok_or_else(|| StoreError::Decode {
                row,
                column,
                message: "no such cell".to_string(),
            })
    }

    /// Read a cell as text. Numbers are rendered; NULL and blobs are errors.
    pub fn string_value(&self, row: usize, column: usize) -> Result<String, StoreError> {
        match self.cell(row, column)? {
            Value::Text(s) => Ok(s.clone()),
            Value::Integer(v) => Ok(v.to_string()),
            Value::Real(v) => Ok(v.to_string()),
            other => Err(StoreError::Decode {
                row,
                column,
                message: format!("expected text, found {}", other.kind()),
            }),
        }
    }

    /// Read a cell as a 64-bit integer. Text holding an integer is accepted.
    pub fn i64_value(&self, row: usize, column: usize) -> Result<i64, StoreError> {
        match self.cell(row, column)? {
            Value::Integer(v) => Ok(*v),
            Value::Text(s) => s.trim().parse().map_err(|_| StoreError::Decode {
                row,
                column,
                message: format!("expected integer, found text {s:?}"),
            }),
            other => Err(StoreError::Decode {
                row,
                column,
                message: format!("expected integer, found {}", other.kind()),
            }),
        }
    }
}
