//! Route definitions.

pub mod catalog;
pub mod health;
pub mod timeline;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (mounted at the root).
///
/// ```text
/// /timeline/blocks            GET list, POST create, PUT update, DELETE delete
/// /timeline/blocks/wrap       POST wrap
/// /timeline/items             GET list, POST create, PUT update, DELETE delete
/// /timeline/templates         GET list, POST create/apply (action dispatch)
///
/// /topics                     GET list
/// /topics/{id}                GET detail
/// /journey/tiers              GET tiers with modules
/// /entities                   GET list
/// /entities/{id}              GET detail
/// /entities/batch-topics      POST batched entity-to-topic lookup
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .nest("/timeline", timeline::router())
        .merge(catalog::router())
}
