//! Handlers for timeline item CRUD. Mirrors the block handlers, keyed by
//! `blockId` instead of `userId`.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use journey_core::error::CoreError;
use journey_core::timeline::{validate_item_type, validate_name};
use journey_db::models::timeline_item::{CreateTimelineItem, UpdateTimelineItem};
use journey_db::repositories::{BlockRepo, ItemRepo};

use crate::error::{AppError, AppResult};
use crate::response::{IdMessageResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub block_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub block_id: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub related_topics: Option<Vec<String>>,
    pub url: Option<String>,
    pub reminder: Option<serde_json::Value>,
    pub date: Option<String>,
    pub position: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub id: Option<String>,
    #[serde(default)]
    pub updates: UpdateTimelineItem,
}

// ---------------------------------------------------------------------------
// GET /timeline/items
// ---------------------------------------------------------------------------

/// List all items attached to a block, ordered by position.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let block_id = params
        .block_id
        .ok_or_else(|| AppError::BadRequest("Block ID required".into()))?;
    let items = ItemRepo::list_by_block(&state.pool, &block_id).await?;
    tracing::debug!(count = items.len(), %block_id, "Listed timeline items");
    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// POST /timeline/items
// ---------------------------------------------------------------------------

/// Create a new timeline item under an existing block.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateItemRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(block_id), Some(item_type), Some(title)) =
        (input.block_id, input.item_type, input.title)
    else {
        return Err(AppError::BadRequest("Missing required fields".into()));
    };
    validate_name("title", &title)?;
    validate_item_type(&item_type)?;
    if BlockRepo::find_by_id(&state.pool, &block_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Block {block_id} does not exist"
        ))));
    }

    let created = ItemRepo::create(
        &state.pool,
        &CreateTimelineItem {
            block_id,
            item_type,
            title,
            description: input.description,
            related_topics: input.related_topics,
            url: input.url,
            reminder: input.reminder,
            date: input.date,
            position: input.position,
        },
    )
    .await?;
    tracing::info!(id = %created.id, title = %created.title, "Timeline item created");
    Ok(Json(IdMessageResponse {
        id: created.id,
        message: "Timeline item created successfully",
    }))
}

// ---------------------------------------------------------------------------
// PUT /timeline/items
// ---------------------------------------------------------------------------

/// Apply a partial patch to an item.
pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<UpdateItemRequest>,
) -> AppResult<impl IntoResponse> {
    let id = input
        .id
        .ok_or_else(|| AppError::BadRequest("Item ID required".into()))?;
    if let Some(title) = &input.updates.title {
        validate_name("title", title)?;
    }
    if let Some(item_type) = &input.updates.item_type {
        validate_item_type(item_type)?;
    }

    let updated = ItemRepo::update(&state.pool, &id, &input.updates).await?;
    match updated {
        Some(_) => Ok(Json(MessageResponse {
            message: "Timeline item updated successfully",
        })),
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "TimelineItem",
            id,
        })),
    }
}

// ---------------------------------------------------------------------------
// DELETE /timeline/items
// ---------------------------------------------------------------------------

/// Delete an item by id.
pub async fn delete(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<impl IntoResponse> {
    let id = params
        .id
        .ok_or_else(|| AppError::BadRequest("Item ID required".into()))?;
    if ItemRepo::delete(&state.pool, &id).await? {
        tracing::info!(%id, "Timeline item deleted");
        Ok(Json(MessageResponse {
            message: "Timeline item deleted successfully",
        }))
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "TimelineItem",
            id,
        }))
    }
}
