//! Read query definitions.

use arrests_core::QueryResult;
use serde::Serialize;

use crate::record::{Column, Record};

/// Named in-memory GDS projections the algorithm queries read from.
///
/// They are built outside the dashboard and must exist before the
/// community and centrality panels can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Person/crime graph used for Louvain community detection.
    ArrestCount,
    /// Location graph used for precinct degree centrality.
    Precinct,
}

impl Projection {
    pub const ALL: [Projection; 2] = [Projection::ArrestCount, Projection::Precinct];

    /// Name of the projection in the GDS graph catalog.
    pub fn name(&self) -> &'static str {
        match self {
            Projection::ArrestCount => "mygraph2",
            Projection::Precinct => "mygraph",
        }
    }
}

/// The two families of dashboard queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Pattern match, group, count, order.
    Aggregation,
    /// Streams a GDS algorithm over a pre-built projection.
    Algorithm(Projection),
}

/// A parameterless, read-only query and the shaper for its rows.
pub struct ReadQuery<T> {
    pub name: &'static str,
    pub kind: QueryKind,
    pub cypher: &'static str,
    pub columns: &'static [Column],
    pub shape: fn(&Record) -> QueryResult<T>,
}

impl<T> ReadQuery<T> {
    /// Shape every record, stopping at the first one that does not fit.
    pub fn shape_all(&self, records: &[Record]) -> QueryResult<Vec<T>> {
        records.iter().map(self.shape).collect()
    }

    pub fn projection(&self) -> Option<Projection> {
        match self.kind {
            QueryKind::Algorithm(projection) => Some(projection),
            QueryKind::Aggregation => None,
        }
    }
}

impl<T> std::fmt::Debug for ReadQuery<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadQuery")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
