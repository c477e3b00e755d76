//! Application state.

use std::sync::Arc;

use arrests_core::DashboardSettings;
use arrests_graph::ArrestRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<ArrestRepository>,
    pub settings: DashboardSettings,
}

impl AppState {
    pub fn new(repo: Arc<ArrestRepository>, settings: DashboardSettings) -> Self {
        Self { repo, settings }
    }
}
