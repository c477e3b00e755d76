//! Arrests Web Server
//!
//! Axum-based dashboard and JSON API over the arrests graph.

pub mod aggregate;
pub mod chart;
pub mod routes;
pub mod state;
pub mod view;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/arrests", get(routes::api::arrests))
        .route("/hotspots", get(routes::api::hotspots))
        .route("/age-categories", get(routes::api::age_categories))
        .route("/race", get(routes::api::race))
        .route("/gender", get(routes::api::gender))
        .route("/common-crimes", get(routes::api::common_crimes))
        .route("/crimes", get(routes::api::crimes))
        .route("/community", get(routes::api::community))
        .route("/degree-centrality", get(routes::api::degree_centrality))
        .route("/stats", get(routes::api::stats))
        .route("/projections", get(routes::api::projections))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::pages::overview))
        .route("/hotspots", get(routes::pages::hotspots))
        .route("/stats", get(routes::pages::stats))
        .route("/health", get(routes::api::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server until Ctrl-C, then close the store handle.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let repo = state.repo.clone();
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repo.close().await;
    tracing::info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
