//! GDS algorithm streams.
//!
//! These read from named in-memory projections that are built and
//! refreshed outside the dashboard. When a projection is missing the
//! driver reports a procedure failure, which surfaces as
//! `QueryError::MissingProjection`.

use arrests_core::model::{CentralityStat, CommunityStat};
use arrests_core::QueryResult;

use crate::query::{Projection, QueryKind, ReadQuery};
use crate::record::{Column, ColumnKind, Record};

/// Louvain community sizes, largest first, top 20.
pub static COMMUNITY: ReadQuery<CommunityStat> = ReadQuery {
    name: "community",
    kind: QueryKind::Algorithm(Projection::ArrestCount),
    cypher: "CALL gds.louvain.stream('mygraph2')
             YIELD nodeId, communityId
             WITH communityId, count(*) AS community_count
             RETURN communityId AS community_id, community_count
             ORDER BY community_count DESC
             LIMIT 20",
    columns: &[
        Column::new("community_id", ColumnKind::Integer),
        Column::new("community_count", ColumnKind::Integer),
    ],
    shape: shape_community,
};

/// Precincts by degree centrality, highest first, top 10.
pub static DEGREE_CENTRALITY: ReadQuery<CentralityStat> = ReadQuery {
    name: "degree_centrality",
    kind: QueryKind::Algorithm(Projection::Precinct),
    cypher: "CALL gds.degree.stream('mygraph')
             YIELD nodeId, score
             WITH gds.util.asNode(nodeId).arrest_precinct AS location, score
             RETURN location, score
             ORDER BY score DESC
             LIMIT 10",
    columns: &[
        Column::new("location", ColumnKind::Text),
        Column::new("score", ColumnKind::Float),
    ],
    shape: shape_centrality,
};

static ARREST_COUNT_EXISTS: ReadQuery<bool> = ReadQuery {
    name: "projection_exists_mygraph2",
    kind: QueryKind::Algorithm(Projection::ArrestCount),
    cypher: "CALL gds.graph.exists('mygraph2') YIELD exists RETURN exists",
    columns: EXISTS_COLUMNS,
    shape: shape_exists,
};

static PRECINCT_EXISTS: ReadQuery<bool> = ReadQuery {
    name: "projection_exists_mygraph",
    kind: QueryKind::Algorithm(Projection::Precinct),
    cypher: "CALL gds.graph.exists('mygraph') YIELD exists RETURN exists",
    columns: EXISTS_COLUMNS,
    shape: shape_exists,
};

const EXISTS_COLUMNS: &[Column] = &[Column::new("exists", ColumnKind::Boolean)];

/// Catalog lookup for a projection. Does not build anything.
pub fn projection_exists_query(projection: Projection) -> &'static ReadQuery<bool> {
    match projection {
        Projection::ArrestCount => &ARREST_COUNT_EXISTS,
        Projection::Precinct => &PRECINCT_EXISTS,
    }
}

fn shape_community(record: &Record) -> QueryResult<CommunityStat> {
    Ok(CommunityStat {
        community_id: record.integer("community_id")?,
        member_count: record.integer("community_count")?,
    })
}

fn shape_centrality(record: &Record) -> QueryResult<CentralityStat> {
    Ok(CentralityStat {
        precinct: record.label("location")?,
        score: record.float("score")?,
    })
}

fn shape_exists(record: &Record) -> QueryResult<bool> {
    record.boolean("exists")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_name_their_projection() {
        for projection in Projection::ALL {
            let query = projection_exists_query(projection);
            assert_eq!(query.projection(), Some(projection));
            assert!(query.cypher.contains(&format!("'{}'", projection.name())));
        }
        assert!(COMMUNITY.cypher.contains(Projection::ArrestCount.name()));
        assert!(DEGREE_CENTRALITY.cypher.contains(Projection::Precinct.name()));
    }

    #[test]
    fn test_centrality_score_from_integer() {
        let record = Record::new().with("location", 14_i64).with("score", 310_i64);
        let stat = (DEGREE_CENTRALITY.shape)(&record).unwrap();
        assert_eq!(stat.precinct, "14");
        assert_eq!(stat.score, 310.0);
    }

    #[test]
    fn test_algorithm_streams_ranked_and_limited() {
        assert!(COMMUNITY.cypher.contains("ORDER BY community_count DESC"));
        assert!(COMMUNITY.cypher.contains("LIMIT 20"));
        assert!(DEGREE_CENTRALITY.cypher.contains("ORDER BY score DESC"));
        assert!(DEGREE_CENTRALITY.cypher.contains("LIMIT 10"));
    }
}
