//! API handlers for pairrank-ui

mod actions;
mod health;
mod pages;

pub use actions::{create_set, start_ranking, vote};
pub use health::health_routes;
pub use pages::{index, ranking_page, set_page};
