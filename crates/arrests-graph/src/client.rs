//! Neo4j connection client.

use arrests_core::{GraphConfig, QueryError, QueryResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use neo4rs::{ConfigBuilder, Graph, Query, Row};

use crate::reader::GraphReader;
use crate::record::{Column, ColumnKind, Record, Value};

/// Rows pulled per round trip. The largest result (arrests by date) is a
/// few hundred rows.
const FETCH_SIZE: usize = 500;

/// Read client over a neo4rs connection pool.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// neo4rs builds its pool lazily, so a `RETURN 1` ping forces the bolt
    /// handshake here and lets the caller bound it with a timeout.
    pub async fn connect(config: &GraphConfig) -> QueryResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .fetch_size(FETCH_SIZE)
            .build()
            .map_err(driver_error)?;

        let graph = Graph::connect(neo4j_config).await.map_err(driver_error)?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(driver_error)?;

        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphReader for GraphClient {
    async fn read(&self, cypher: &str, columns: &[Column]) -> QueryResult<Vec<Record>> {
        let mut stream = self
            .graph
            .execute(Query::new(cypher.to_string()))
            .await
            .map_err(driver_error)?;

        let mut records = Vec::new();
        while let Some(row) = stream.next().await.map_err(driver_error)? {
            records.push(extract(&row, columns)?);
        }
        Ok(records)
    }
}

/// Pull the declared columns out of a driver row.
fn extract(row: &Row, columns: &[Column]) -> QueryResult<Record> {
    let mut record = Record::new();
    for column in columns {
        let value = match column.kind {
            ColumnKind::Integer => Value::from(get::<Option<i64>>(row, column.name)?),
            ColumnKind::Float => match row.get::<Option<f64>>(column.name) {
                Ok(v) => Value::from(v),
                Err(_) => Value::from(get::<Option<i64>>(row, column.name)?),
            },
            ColumnKind::Boolean => Value::from(get::<Option<bool>>(row, column.name)?),
            ColumnKind::Text => match row.get::<Option<String>>(column.name) {
                Ok(v) => Value::from(v),
                Err(_) => Value::from(get::<Option<i64>>(row, column.name)?),
            },
            ColumnKind::Date => Value::from(get::<Option<NaiveDate>>(row, column.name)?),
        };
        record.insert(column.name, value);
    }
    Ok(record)
}

fn get<T: serde::de::DeserializeOwned>(row: &Row, column: &str) -> QueryResult<T> {
    row.get::<T>(column)
        .map_err(|e| QueryError::decode(column, format!("{:?}", e)))
}

/// Map a driver failure onto the dashboard's error taxonomy.
pub(crate) fn driver_error(err: neo4rs::Error) -> QueryError {
    match err {
        neo4rs::Error::Neo4j(e) => classify(e.code(), e.message()),
        neo4rs::Error::IOError { detail } => QueryError::Connectivity(detail.to_string()),
        neo4rs::Error::ConnectionError => {
            QueryError::Connectivity("connection to the server was lost".to_string())
        }
        neo4rs::Error::AuthenticationError(msg) => {
            QueryError::Connectivity(format!("authentication failed: {msg}"))
        }
        other => QueryError::Driver(other.to_string()),
    }
}

/// Classify a server-side failure by its Neo4j status code and message.
pub fn classify(code: &str, message: &str) -> QueryError {
    let detail = format!("{code}: {message}");
    let lowered = message.to_lowercase();

    if code.starts_with("Neo.ClientError.Statement.") {
        return QueryError::MalformedQuery(detail);
    }
    if code == "Neo.ClientError.Procedure.ProcedureNotFound" {
        return QueryError::MissingProjection(detail);
    }
    if code.starts_with("Neo.ClientError.Procedure.")
        && lowered.contains("graph")
        && (lowered.contains("does not exist") || lowered.contains("not found"))
    {
        return QueryError::MissingProjection(detail);
    }
    if code.starts_with("Neo.ClientError.Security.")
        || code == "Neo.TransientError.General.DatabaseUnavailable"
        || code.ends_with("ServiceUnavailable")
    {
        return QueryError::Connectivity(detail);
    }
    QueryError::Driver(detail)
}
