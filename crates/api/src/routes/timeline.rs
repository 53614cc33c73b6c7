//! Route definitions for the timeline subsystem.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{timeline_blocks, timeline_items, timeline_templates};
use crate::state::AppState;

/// Routes mounted at `/timeline`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/blocks",
            get(timeline_blocks::list)
                .post(timeline_blocks::create)
                .put(timeline_blocks::update)
                .delete(timeline_blocks::delete),
        )
        .route("/blocks/wrap", post(timeline_blocks::wrap))
        .route(
            "/items",
            get(timeline_items::list)
                .post(timeline_items::create)
                .put(timeline_items::update)
                .delete(timeline_items::delete),
        )
        .route(
            "/templates",
            get(timeline_templates::list).post(timeline_templates::dispatch),
        )
}
