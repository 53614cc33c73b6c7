//! Read-only entity directory lookups, including the batched
//! entity-to-topic endpoint.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use indexmap::IndexMap;
use serde::Deserialize;

use journey_core::error::CoreError;
use journey_db::models::entity::EntityTopicRow;
use journey_db::repositories::EntityRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters / request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Comma-separated entity types (`researcher,organization`).
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    pub include_inactive: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTopicsRequest {
    pub entity_ids: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// GET /entities
// ---------------------------------------------------------------------------

/// List entities, optionally filtered by type; inactive entities only when
/// asked for.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let types: Vec<String> = match params.entity_type.as_deref() {
        Some(raw) if raw != "all" => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    };
    let entities = EntityRepo::list(
        &state.pool,
        &types,
        params.include_inactive.unwrap_or(false),
    )
    .await?;
    Ok(Json(entities))
}

// ---------------------------------------------------------------------------
// GET /entities/{id}
// ---------------------------------------------------------------------------

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let entity = EntityRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Entity",
            id,
        }))?;
    Ok(Json(entity))
}

// ---------------------------------------------------------------------------
// POST /entities/batch-topics
// ---------------------------------------------------------------------------

/// One batched lookup for many entities, grouped by entity id and then by
/// relationship type, preserving the store's row order within each group.
pub async fn batch_topics(
    State(state): State<AppState>,
    Json(input): Json<BatchTopicsRequest>,
) -> AppResult<impl IntoResponse> {
    let entity_ids = input
        .entity_ids
        .ok_or_else(|| AppError::BadRequest("entityIds must be an array".into()))?;

    let rows = EntityRepo::topics_for_entities(&state.pool, &entity_ids).await?;

    let mut grouped: IndexMap<String, IndexMap<String, Vec<EntityTopicRow>>> = IndexMap::new();
    for row in rows {
        grouped
            .entry(row.entity_id.clone())
            .or_default()
            .entry(row.relationship_type.clone())
            .or_default()
            .push(row);
    }
    Ok(Json(grouped))
}
