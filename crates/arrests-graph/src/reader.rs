//! The seam between the facade and the graph driver.

use arrests_core::QueryResult;
use async_trait::async_trait;

use crate::record::{Column, Record};

/// Executes a read-only Cypher statement and extracts the declared columns.
///
/// Implementations open a fresh result stream per call and release it
/// before returning, on success and on failure.
#[async_trait]
pub trait GraphReader: Send + Sync {
    async fn read(&self, cypher: &str, columns: &[Column]) -> QueryResult<Vec<Record>>;
}
