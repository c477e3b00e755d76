//! Scalar graph statistics.
//!
//! Each query returns a single `count` row.

use arrests_core::QueryResult;

use crate::query::{QueryKind, ReadQuery};
use crate::record::{Column, ColumnKind, Record};

const COUNT_COLUMNS: &[Column] = &[Column::new("count", ColumnKind::Integer)];

pub static TOTAL_NODES: ReadQuery<i64> = ReadQuery {
    name: "total_nodes",
    kind: QueryKind::Aggregation,
    cypher: "MATCH (n) RETURN count(n) AS count",
    columns: COUNT_COLUMNS,
    shape: shape_count,
};

pub static NUM_RELATIONSHIPS: ReadQuery<i64> = ReadQuery {
    name: "num_relationships",
    kind: QueryKind::Aggregation,
    cypher: "MATCH ()-[r]->() RETURN count(r) AS count",
    columns: COUNT_COLUMNS,
    shape: shape_count,
};

pub static ISOLATED_NODES: ReadQuery<i64> = ReadQuery {
    name: "isolated_nodes",
    kind: QueryKind::Aggregation,
    cypher: "MATCH (n) WHERE NOT (n)--() RETURN count(n) AS count",
    columns: COUNT_COLUMNS,
    shape: shape_count,
};

/// Number of COMMITTED relationships.
pub static CRIMES_COMMITTED: ReadQuery<i64> = ReadQuery {
    name: "crimes_committed",
    kind: QueryKind::Aggregation,
    cypher: "MATCH ()-[r:COMMITTED]->() RETURN count(r) AS count",
    columns: COUNT_COLUMNS,
    shape: shape_count,
};

/// Number of distinct offense descriptions.
pub static NUM_CRIMES: ReadQuery<i64> = ReadQuery {
    name: "num_crimes",
    kind: QueryKind::Aggregation,
    cypher: "MATCH (n:Crime) RETURN count(DISTINCT n.offense_desc) AS count",
    columns: COUNT_COLUMNS,
    shape: shape_count,
};

fn shape_count(record: &Record) -> QueryResult<i64> {
    record.integer("count")
}
