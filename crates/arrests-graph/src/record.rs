//! Driver-independent result records.
//!
//! The driver adapter extracts the columns a query declares into a
//! [`Record`]; result shapers read typed values back out of it.

use std::collections::HashMap;

use arrests_core::model::UNKNOWN_LABEL;
use arrests_core::{QueryError, QueryResult};
use chrono::NaiveDate;

/// How a column should be pulled out of a driver row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Boolean,
    /// String property that may also be stored as an integer.
    Text,
    Date,
}

/// A named column of a query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// A single extracted value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Date(NaiveDate),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
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

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// One result row, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<Value>) {
        self.values.insert(column.to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    fn require(&self, column: &str) -> QueryResult<&Value> {
        self.get(column)
            .ok_or_else(|| QueryError::decode(column, "column missing from record"))
    }

    pub fn integer(&self, column: &str) -> QueryResult<i64> {
        match self.require(column)? {
            Value::Integer(v) => Ok(*v),
            other => Err(unexpected(column, "integer", other)),
        }
    }

    /// Floats also accept integers, which GDS returns for whole scores.
    pub fn float(&self, column: &str) -> QueryResult<f64> {
        match self.require(column)? {
            Value::Float(v) => Ok(*v),
            Value::Integer(v) => Ok(*v as f64),
            other => Err(unexpected(column, "float", other)),
        }
    }

    pub fn boolean(&self, column: &str) -> QueryResult<bool> {
        match self.require(column)? {
            Value::Boolean(v) => Ok(*v),
            other => Err(unexpected(column, "boolean", other)),
        }
    }

    pub fn text(&self, column: &str) -> QueryResult<String> {
        match self.require(column)? {
            Value::Text(v) => Ok(v.clone()),
            Value::Integer(v) => Ok(v.to_string()),
            other => Err(unexpected(column, "text", other)),
        }
    }

    /// Like [`Record::text`], but a null becomes [`UNKNOWN_LABEL`].
    pub fn label(&self, column: &str) -> QueryResult<String> {
        match self.require(column)? {
            Value::Null => Ok(UNKNOWN_LABEL.to_string()),
            _ => self.text(column),
        }
    }

    pub fn date(&self, column: &str) -> QueryResult<NaiveDate> {
        match self.require(column)? {
            Value::Date(v) => Ok(*v),
            other => Err(unexpected(column, "date", other)),
        }
    }
}

fn unexpected(column: &str, expected: &str, found: &Value) -> QueryError {
    QueryError::decode(column, format!("expected {expected}, found {found:?}"))
}
