//! In-memory GraphReader for testing.
//!
//! Responses are registered per query; unregistered queries return no
//! rows, like a store with no matching data.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use arrests_core::{QueryError, QueryResult};
use async_trait::async_trait;

use crate::query::ReadQuery;
use crate::reader::GraphReader;
use crate::record::{Column, Record};

#[derive(Default)]
pub struct MockGraphReader {
    responses: Mutex<HashMap<String, QueryResult<Vec<Record>>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockGraphReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `records` whenever `query` runs.
    pub fn respond<T>(self, query: &ReadQuery<T>, records: Vec<Record>) -> Self {
        self.set(query.cypher, Ok(records));
        self
    }

    /// Fail `query` with `error`.
    pub fn fail<T>(self, query: &ReadQuery<T>, error: QueryError) -> Self {
        self.set(query.cypher, Err(error));
        self
    }

    /// Sleep before answering every read.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set(&self, cypher: &str, response: QueryResult<Vec<Record>>) {
        self.responses
            .lock()
            .unwrap()
            .insert(cypher.to_string(), response);
    }
}

#[async_trait]
impl GraphReader for MockGraphReader {
    async fn read(&self, cypher: &str, _columns: &[Column]) -> QueryResult<Vec<Record>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .get(cypher)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
