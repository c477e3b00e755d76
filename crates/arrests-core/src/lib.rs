//! Arrests Core Library
//!
//! Result models, error types and configuration shared by the graph
//! facade, the web dashboard and the CLI.

pub mod config;
pub mod error;
pub mod model;

pub use config::{ConfigError, DashboardConfig, DashboardSettings, GraphConfig};
pub use error::{QueryError, QueryResult, QueryResultExt};
