//! # Arrests Graph
//!
//! Neo4j access for the NYPD arrests dashboard.
//!
//! Provides the fixed set of read-only dashboard queries, the neo4rs
//! client that runs them, and the `ArrestRepository` facade the web
//! layer calls.

pub mod client;
pub mod queries;
pub mod query;
pub mod reader;
pub mod record;
pub mod repository;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use client::GraphClient;
pub use query::{Projection, QueryKind, ReadQuery};
pub use reader::GraphReader;
pub use record::{Column, ColumnKind, Record, Value};
pub use repository::ArrestRepository;
