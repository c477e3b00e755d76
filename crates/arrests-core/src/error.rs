//! Centralized error types for query execution.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single read against the graph store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Graph driver not initialized")]
    NotConnected,

    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Graph projection unavailable: {0}")]
    MissingProjection(String),

    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("Failed to decode column '{column}': {reason}")]
    Decode { column: String, reason: String },

    #[error("Driver error: {0}")]
    Driver(String),
}

/// Result type for facade operations.
pub type QueryResult<T> = Result<T, QueryError>;

impl QueryError {
    /// Create a decode error for a column.
    pub fn decode(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Short, human readable name of the failure class.
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotConnected => "not connected",
            Self::Connectivity(_) => "connectivity",
            Self::Timeout(_) => "timeout",
            Self::MissingProjection(_) => "missing projection",
            Self::MalformedQuery(_) => "malformed query",
            Self::Decode { .. } => "unexpected result shape",
            Self::Driver(_) => "driver",
        }
    }
}

/// Adapters over facade results.
pub trait QueryResultExt<T> {
    /// Collapse a failure into an empty list. The error has already been
    /// logged by the facade.
    fn or_empty(self) -> Vec<T>;
}

impl<T> QueryResultExt<T> for QueryResult<Vec<T>> {
    fn or_empty(self) -> Vec<T> {
        self.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_empty_conflates_failure_and_empty() {
        let failed: QueryResult<Vec<i64>> = Err(QueryError::Timeout(Duration::from_secs(5)));
        let empty: QueryResult<Vec<i64>> = Ok(Vec::new());
        assert_eq!(failed.or_empty(), empty.or_empty());
    }

    #[test]
    fn test_or_empty_keeps_rows() {
        let rows: QueryResult<Vec<i64>> = Ok(vec![3, 1]);
        assert_eq!(rows.or_empty(), vec![3, 1]);
    }

    #[test]
    fn test_decode_message_names_column() {
        let err = QueryError::decode("arrests_count", "null value");
        assert_eq!(
            err.to_string(),
            "Failed to decode column 'arrests_count': null value"
        );
        assert_eq!(err.category(), "unexpected result shape");
    }
}
