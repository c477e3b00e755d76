//! Query facade over the graph store.
//!
//! `ArrestRepository` owns the driver handle and exposes one method per
//! dashboard query. Every method goes through [`ArrestRepository::execute`],
//! which checks the handle, runs the query inside a timeout-bounded read
//! and shapes the rows. Failures are logged here and returned as a typed
//! [`QueryError`]; callers that want the old "failure renders as empty"
//! behaviour use [`arrests_core::QueryResultExt::or_empty`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use arrests_core::model::{
    AgeCategoryCount, ArrestsByDate, CategoryCount, CentralityStat, CommunityStat, CrimeCount,
    Hotspot,
};
use arrests_core::{GraphConfig, QueryError, QueryResult};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::client::GraphClient;
use crate::queries;
use crate::query::{Projection, ReadQuery};
use crate::reader::GraphReader;

pub struct ArrestRepository {
    reader: RwLock<Option<Arc<dyn GraphReader>>>,
    query_timeout: Duration,
}

impl ArrestRepository {
    /// Connect to Neo4j. A failed connection is logged and leaves the
    /// handle unset; every query then returns [`QueryError::NotConnected`].
    pub async fn connect(config: &GraphConfig) -> Self {
        match Self::try_connect(config).await {
            Ok(repo) => repo,
            Err(e) => {
                error!(uri = %config.uri, error = %e, "Failed to create the graph driver");
                Self::disconnected(config.query_timeout())
            }
        }
    }

    /// Connect to Neo4j, returning the failure instead of logging it.
    pub async fn try_connect(config: &GraphConfig) -> QueryResult<Self> {
        let timeout = config.connect_timeout();
        let client = tokio::time::timeout(timeout, GraphClient::connect(config))
            .await
            .map_err(|_| {
                QueryError::Connectivity(format!("no response from {} within {:?}", config.uri, timeout))
            })??;

        info!(uri = %config.uri, database = %config.database, "Connected to Neo4j");
        Ok(Self::with_reader(Arc::new(client), config.query_timeout()))
    }

    /// Wrap an existing reader.
    pub fn with_reader(reader: Arc<dyn GraphReader>, query_timeout: Duration) -> Self {
        Self {
            reader: RwLock::new(Some(reader)),
            query_timeout,
        }
    }

    /// A repository whose handle was never established.
    pub fn disconnected(query_timeout: Duration) -> Self {
        Self {
            reader: RwLock::new(None),
            query_timeout,
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.reader.read().await.is_some()
    }

    /// Release the driver handle. Safe to call repeatedly.
    pub async fn close(&self) {
        if self.reader.write().await.take().is_some() {
            info!("Graph driver closed");
        }
    }

    /// Run a query inside a timeout-bounded read and shape its rows.
    pub async fn execute<T>(&self, query: &ReadQuery<T>) -> QueryResult<Vec<T>> {
        let result = self.run(query).await;
        if let Err(e) = &result {
            match e {
                QueryError::NotConnected => {
                    error!(query = query.name, "Query called without an initialized driver")
                }
                _ => warn!(query = query.name, category = e.category(), error = %e, "Query failed"),
            }
        }
        result
    }

    async fn run<T>(&self, query: &ReadQuery<T>) -> QueryResult<Vec<T>> {
        let reader = self
            .reader
            .read()
            .await
            .clone()
            .ok_or(QueryError::NotConnected)?;

        debug!(query = query.name, "Running query");
        let started = Instant::now();
        let records = tokio::time::timeout(self.query_timeout, reader.read(query.cypher, query.columns))
            .await
            .map_err(|_| QueryError::Timeout(self.query_timeout))??;

        let rows = query.shape_all(&records)?;
        debug!(
            query = query.name,
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Query complete"
        );
        Ok(rows)
    }

    /// Run a single-row count query. No row counts as zero.
    async fn execute_scalar(&self, query: &ReadQuery<i64>) -> QueryResult<i64> {
        Ok(self.execute(query).await?.into_iter().next().unwrap_or(0))
    }

    pub async fn get_arrests(&self) -> QueryResult<Vec<ArrestsByDate>> {
        self.execute(&queries::ARRESTS_BY_DATE).await
    }

    pub async fn get_hotspots(&self) -> QueryResult<Vec<Hotspot>> {
        self.execute(&queries::HOTSPOTS).await
    }

    pub async fn age_categories(&self) -> QueryResult<Vec<AgeCategoryCount>> {
        self.execute(&queries::AGE_CATEGORIES).await
    }

    pub async fn arrests_by_race(&self) -> QueryResult<Vec<CategoryCount>> {
        self.execute(&queries::ARRESTS_BY_RACE).await
    }

    pub async fn arrests_by_gender(&self) -> QueryResult<Vec<CategoryCount>> {
        self.execute(&queries::ARRESTS_BY_GENDER).await
    }

    pub async fn common_crimes(&self) -> QueryResult<Vec<CrimeCount>> {
        self.execute(&queries::COMMON_CRIMES).await
    }

    pub async fn crime_list(&self) -> QueryResult<Vec<String>> {
        self.execute(&queries::CRIME_LIST).await
    }

    pub async fn total_nodes(&self) -> QueryResult<i64> {
        self.execute_scalar(&queries::TOTAL_NODES).await
    }

    pub async fn num_relationships(&self) -> QueryResult<i64> {
        self.execute_scalar(&queries::NUM_RELATIONSHIPS).await
    }

    pub async fn isolated_nodes(&self) -> QueryResult<i64> {
        self.execute_scalar(&queries::ISOLATED_NODES).await
    }

    pub async fn crimes_committed(&self) -> QueryResult<i64> {
        self.execute_scalar(&queries::CRIMES_COMMITTED).await
    }

    pub async fn num_crimes(&self) -> QueryResult<i64> {
        self.execute_scalar(&queries::NUM_CRIMES).await
    }

    /// Requires the arrest-count projection.
    pub async fn community(&self) -> QueryResult<Vec<CommunityStat>> {
        self.execute(&queries::COMMUNITY).await
    }

    /// Requires the precinct projection.
    pub async fn degree_centrality(&self) -> QueryResult<Vec<CentralityStat>> {
        self.execute(&queries::DEGREE_CENTRALITY).await
    }

    /// Look the projection up in the GDS catalog.
    pub async fn projection_exists(&self, projection: Projection) -> QueryResult<bool> {
        let rows = self
            .execute(queries::projection_exists_query(projection))
            .await?;
        Ok(rows.into_iter().next().unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockGraphReader;
    use crate::record::Record;
    use arrests_core::QueryResultExt;
    use chrono::NaiveDate;

    fn repo(reader: MockGraphReader) -> ArrestRepository {
        ArrestRepository::with_reader(Arc::new(reader), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_get_arrests_groups_by_date() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let feb = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let reader = MockGraphReader::new().respond(
            &queries::ARRESTS_BY_DATE,
            vec![
                Record::new().with("arrest_date", jan).with("arrests_count", 2_i64),
                Record::new().with("arrest_date", feb).with("arrests_count", 1_i64),
            ],
        );

        let rows = repo(reader).get_arrests().await.unwrap();
        assert_eq!(rows, vec![ArrestsByDate::new(jan, 2), ArrestsByDate::new(feb, 1)]);
        assert!(rows.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[tokio::test]
    async fn test_common_crimes() {
        let reader = MockGraphReader::new().respond(
            &queries::COMMON_CRIMES,
            vec![
                Record::new().with("crime", "Theft").with("crime_count", 3_i64),
                Record::new().with("crime", "Assault").with("crime_count", 1_i64),
            ],
        );

        let rows = repo(reader).common_crimes().await.unwrap();
        assert_eq!(rows, vec![CrimeCount::new("Theft", 3), CrimeCount::new("Assault", 1)]);
    }

    #[tokio::test]
    async fn test_ranked_results_keep_descending_order() {
        let reader = MockGraphReader::new()
            .respond(
                &queries::HOTSPOTS,
                vec![
                    Record::new().with("borough", "K").with("precinct", "75").with("num_arrests", 50_i64),
                    Record::new().with("borough", "M").with("precinct", "14").with("num_arrests", 40_i64),
                    Record::new().with("borough", "K").with("precinct", "73").with("num_arrests", 40_i64),
                ],
            )
            .respond(
                &queries::COMMON_CRIMES,
                vec![
                    Record::new().with("crime", "Theft").with("crime_count", 3_i64),
                    Record::new().with("crime", "Assault").with("crime_count", 1_i64),
                ],
            )
            .respond(
                &queries::COMMUNITY,
                vec![
                    Record::new().with("community_id", 7_i64).with("community_count", 120_i64),
                    Record::new().with("community_id", 2_i64).with("community_count", 80_i64),
                    Record::new().with("community_id", 9_i64).with("community_count", 80_i64),
                ],
            )
            .respond(
                &queries::DEGREE_CENTRALITY,
                vec![
                    Record::new().with("location", "75").with("score", 310.0),
                    Record::new().with("location", "14").with("score", 250.5),
                ],
            );
        let repo = repo(reader);

        let hotspots = repo.get_hotspots().await.unwrap();
        assert_eq!(hotspots.len(), 3);
        assert!(hotspots.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(hotspots[2].precinct, "73");

        let crimes = repo.common_crimes().await.unwrap();
        assert!(crimes.windows(2).all(|w| w[0].count >= w[1].count));

        let communities = repo.community().await.unwrap();
        assert_eq!(communities.iter().map(|c| c.community_id).collect::<Vec<_>>(), vec![7, 2, 9]);
        assert!(communities.windows(2).all(|w| w[0].member_count >= w[1].member_count));

        let centrality = repo.degree_centrality().await.unwrap();
        assert_eq!(centrality[0].precinct, "75");
        assert!(centrality.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn test_empty_store_returns_empty_lists() {
        let repo = repo(MockGraphReader::new());
        assert_eq!(repo.get_hotspots().await.unwrap(), vec![]);
        assert_eq!(repo.age_categories().await.unwrap(), vec![]);
        assert_eq!(repo.arrests_by_race().await.unwrap(), vec![]);
        assert_eq!(repo.community().await.unwrap(), vec![]);
        assert_eq!(repo.crime_list().await.unwrap(), Vec::<String>::new());
        assert_eq!(repo.total_nodes().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_scalar_queries() {
        let reader = MockGraphReader::new()
            .respond(&queries::TOTAL_NODES, vec![Record::new().with("count", 1200_i64)])
            .respond(&queries::NUM_RELATIONSHIPS, vec![Record::new().with("count", 3400_i64)])
            .respond(&queries::NUM_CRIMES, vec![Record::new().with("count", 61_i64)]);
        let repo = repo(reader);

        assert_eq!(repo.total_nodes().await.unwrap(), 1200);
        assert_eq!(repo.num_relationships().await.unwrap(), 3400);
        assert_eq!(repo.num_crimes().await.unwrap(), 61);
        assert_eq!(repo.isolated_nodes().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_projection_is_typed_and_recoverable() {
        let reader = MockGraphReader::new().fail(
            &queries::DEGREE_CENTRALITY,
            QueryError::MissingProjection("Graph with name `mygraph` does not exist".to_string()),
        );
        let repo = repo(reader);

        let result = repo.degree_centrality().await;
        assert!(matches!(result, Err(QueryError::MissingProjection(_))));
        assert!(repo.degree_centrality().await.or_empty().is_empty());

        // Other queries are unaffected.
        assert!(repo.common_crimes().await.is_ok());
    }

    #[tokio::test]
    async fn test_timeout() {
        let reader = MockGraphReader::new().with_delay(Duration::from_secs(2));
        let repo = ArrestRepository::with_reader(Arc::new(reader), Duration::from_millis(20));

        let result = repo.get_hotspots().await;
        assert_eq!(result, Err(QueryError::Timeout(Duration::from_millis(20))));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let reader = Arc::new(MockGraphReader::new());
        let repo = ArrestRepository::with_reader(reader.clone(), Duration::from_secs(5));
        assert!(repo.is_connected().await);

        repo.close().await;
        repo.close().await;

        assert!(!repo.is_connected().await);
        assert_eq!(repo.get_arrests().await, Err(QueryError::NotConnected));
        assert_eq!(reader.calls(), 0);
    }

    #[tokio::test]
    async fn test_disconnected_fails_precondition() {
        let repo = ArrestRepository::disconnected(Duration::from_secs(5));
        assert_eq!(repo.total_nodes().await, Err(QueryError::NotConnected));
        assert_eq!(repo.community().await, Err(QueryError::NotConnected));
        repo.close().await;
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_leaves_handle_unset() {
        let config = GraphConfig {
            uri: "bolt://127.0.0.1:1".to_string(),
            password: "unused".to_string(),
            connect_timeout_secs: 2,
            ..GraphConfig::default()
        };

        let started = Instant::now();
        let repo = ArrestRepository::connect(&config).await;
        assert!(started.elapsed() < Duration::from_secs(10));
        assert!(!repo.is_connected().await);
        assert_eq!(repo.get_hotspots().await, Err(QueryError::NotConnected));
    }

    #[tokio::test]
    async fn test_projection_exists() {
        let reader = MockGraphReader::new().respond(
            queries::projection_exists_query(Projection::Precinct),
            vec![Record::new().with("exists", true)],
        );
        let repo = repo(reader);

        assert!(repo.projection_exists(Projection::Precinct).await.unwrap());
        assert!(!repo.projection_exists(Projection::ArrestCount).await.unwrap());
    }

    #[tokio::test]
    async fn test_decode_failure_surfaces() {
        let reader = MockGraphReader::new().respond(
            &queries::ARRESTS_BY_GENDER,
            vec![Record::new().with("category", "F")],
        );
        let result = repo(reader).arrests_by_gender().await;
        assert!(matches!(result, Err(QueryError::Decode { .. })));
    }
}
