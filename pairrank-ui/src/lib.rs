//! pairrank-ui library - web frontend for pairwise ranking sessions
//!
//! Serves the ranking pages and forms, and owns the registry that
//! coordinates concurrent comparison submissions.

use std::sync::Arc;

use axum::Router;

pub mod api;
pub mod error;
pub mod html;
pub mod registry;

pub use registry::Registry;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
}

impl AppState {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::index))
        .route("/set/:hash", get(api::set_page))
        .route("/ranking/:token", get(api::ranking_page))
        .route("/sets", post(api::create_set))
        .route("/rankings", post(api::start_ranking))
        .route("/rankings/:token/vote", post(api::vote))
        .merge(api::health_routes())
        .with_state(state)
}
