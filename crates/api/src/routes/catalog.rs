//! Route definitions for the read-only curriculum catalog.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{entities, journey, topics};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/topics", get(topics::list))
        .route("/topics/{id}", get(topics::get_by_id))
        .route("/journey/tiers", get(journey::tiers))
        .route("/entities", get(entities::list))
        .route("/entities/batch-topics", post(entities::batch_topics))
        .route("/entities/{id}", get(entities::get_by_id))
}
