//! JSON route handlers.

use arrests_core::model::{
    AgeCategoryCount, ArrestsByDate, CategoryCount, CentralityStat, CommunityStat, CrimeCount,
    Hotspot,
};
use arrests_core::{QueryError, QueryResult};
use arrests_graph::Projection;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

pub type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

#[derive(Debug, Serialize)]
pub struct GraphStats {
    pub total_nodes: i64,
    pub num_relationships: i64,
    pub isolated_nodes: i64,
    pub crimes_committed: i64,
    pub num_crimes: i64,
}

#[derive(Debug, Serialize)]
pub struct ProjectionStatus {
    pub projection: Projection,
    pub name: &'static str,
    pub exists: bool,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub connected: bool,
}

/// HTTP status for a failed query.
pub fn status_for(error: &QueryError) -> StatusCode {
    match error {
        QueryError::NotConnected | QueryError::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
        QueryError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn respond<T>(result: QueryResult<T>) -> ApiResult<T> {
    result
        .map(Json)
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn arrests(State(state): State<AppState>) -> ApiResult<Vec<ArrestsByDate>> {
    respond(state.repo.get_arrests().await)
}

pub async fn hotspots(State(state): State<AppState>) -> ApiResult<Vec<Hotspot>> {
    respond(state.repo.get_hotspots().await)
}

pub async fn age_categories(State(state): State<AppState>) -> ApiResult<Vec<AgeCategoryCount>> {
    respond(state.repo.age_categories().await)
}

pub async fn race(State(state): State<AppState>) -> ApiResult<Vec<CategoryCount>> {
    respond(state.repo.arrests_by_race().await)
}

pub async fn gender(State(state): State<AppState>) -> ApiResult<Vec<CategoryCount>> {
    respond(state.repo.arrests_by_gender().await)
}

pub async fn common_crimes(State(state): State<AppState>) -> ApiResult<Vec<CrimeCount>> {
    respond(state.repo.common_crimes().await)
}

pub async fn crimes(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    respond(state.repo.crime_list().await)
}

pub async fn community(State(state): State<AppState>) -> ApiResult<Vec<CommunityStat>> {
    respond(state.repo.community().await)
}

pub async fn degree_centrality(State(state): State<AppState>) -> ApiResult<Vec<CentralityStat>> {
    respond(state.repo.degree_centrality().await)
}

/// All five graph counts. Fails on the first failing count.
pub async fn stats(State(state): State<AppState>) -> ApiResult<GraphStats> {
    let repo = &state.repo;
    let stats = async {
        Ok::<_, QueryError>(GraphStats {
            total_nodes: repo.total_nodes().await?,
            num_relationships: repo.num_relationships().await?,
            isolated_nodes: repo.isolated_nodes().await?,
            crimes_committed: repo.crimes_committed().await?,
            num_crimes: repo.num_crimes().await?,
        })
    }
    .await;
    respond(stats)
}

pub async fn projections(State(state): State<AppState>) -> ApiResult<Vec<ProjectionStatus>> {
    let mut statuses = Vec::with_capacity(Projection::ALL.len());
    for projection in Projection::ALL {
        let exists = state
            .repo
            .projection_exists(projection)
            .await
            .map_err(|e| (status_for(&e), e.to_string()))?;
        statuses.push(ProjectionStatus {
            projection,
            name: projection.name(),
            exists,
        });
    }
    Ok(Json(statuses))
}

/// GET /health - 200 when the store handle is set, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    if state.repo.is_connected().await {
        (
            StatusCode::OK,
            Json(Health {
                status: "ok",
                connected: true,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Health {
                status: "disconnected",
                connected: false,
            }),
        )
    }
}
