//! Handlers for time block CRUD and the wrap operation.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use journey_core::error::CoreError;
use journey_core::timeline::{validate_block_type, validate_name, Metadata};
use journey_db::models::timeline_block::{CreateTimeBlock, UpdateTimeBlock, WrapBlocks};
use journey_db::repositories::BlockRepo;

use crate::error::{AppError, AppResult};
use crate::response::{IdMessageResponse, MessageResponse, WrapResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Create request. Required fields are `Option` so their absence yields the
/// API's own 400, not a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlockRequest {
    pub user_id: Option<String>,
    pub parent_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub block_type: Option<String>,
    pub custom_type: Option<String>,
    pub position: Option<i64>,
    pub metadata: Option<Metadata>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlockRequest {
    pub id: Option<String>,
    #[serde(default)]
    pub updates: UpdateTimeBlock,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapRequest {
    pub user_id: Option<String>,
    pub block_ids: Option<Vec<String>>,
    pub parent_name: Option<String>,
    pub parent_type: Option<String>,
    pub parent_custom_type: Option<String>,
    pub parent_start_date: Option<String>,
    pub parent_end_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that `parent_id` references a block owned by `user_id`.
async fn ensure_parent_owned(
    pool: &journey_db::DbPool,
    parent_id: &str,
    user_id: &str,
) -> AppResult<()> {
    let parent = BlockRepo::find_by_id(pool, parent_id).await?;
    match parent {
        Some(block) if block.user_id == user_id => Ok(()),
        _ => Err(AppError::Core(CoreError::Validation(format!(
            "Parent block {parent_id} not found for user"
        )))),
    }
}

// ---------------------------------------------------------------------------
// GET /timeline/blocks
// ---------------------------------------------------------------------------

/// List all blocks owned by a user as a flat array; the client rebuilds the
/// forest from `parentId`/`position`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let user_id = params
        .user_id
        .ok_or_else(|| AppError::BadRequest("User ID required".into()))?;
    let blocks = BlockRepo::list(&state.pool, &user_id).await?;
    tracing::debug!(count = blocks.len(), %user_id, "Listed time blocks");
    Ok(Json(blocks))
}

// ---------------------------------------------------------------------------
// POST /timeline/blocks
// ---------------------------------------------------------------------------

/// Create a new time block.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBlockRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(user_id), Some(name), Some(block_type)) =
        (input.user_id, input.name, input.block_type)
    else {
        return Err(AppError::BadRequest("Missing required fields".into()));
    };
    validate_name("name", &name)?;
    validate_block_type(&block_type)?;
    if let Some(parent_id) = &input.parent_id {
        ensure_parent_owned(&state.pool, parent_id, &user_id).await?;
    }

    let created = BlockRepo::create(
        &state.pool,
        &CreateTimeBlock {
            user_id,
            parent_id: input.parent_id,
            name,
            block_type,
            custom_type: input.custom_type,
            position: input.position,
            metadata: input.metadata,
            start_date: input.start_date,
            end_date: input.end_date,
        },
    )
    .await?;
    tracing::info!(id = %created.id, name = %created.name, "Time block created");
    Ok(Json(IdMessageResponse {
        id: created.id,
        message: "Time block created successfully",
    }))
}

// ---------------------------------------------------------------------------
// PUT /timeline/blocks
// ---------------------------------------------------------------------------

/// Apply a partial patch to a block. Unknown ids are an error rather than a
/// silent no-op.
pub async fn update(
    State(state): State<AppState>,
    Json(input): Json<UpdateBlockRequest>,
) -> AppResult<impl IntoResponse> {
    let id = input
        .id
        .ok_or_else(|| AppError::BadRequest("Block ID required".into()))?;
    if let Some(name) = &input.updates.name {
        validate_name("name", name)?;
    }
    if let Some(block_type) = &input.updates.block_type {
        validate_block_type(block_type)?;
    }

    let updated = BlockRepo::update(&state.pool, &id, &input.updates).await?;
    match updated {
        Some(_) => Ok(Json(MessageResponse {
            message: "Time block updated successfully",
        })),
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "TimeBlock",
            id,
        })),
    }
}

// ---------------------------------------------------------------------------
// DELETE /timeline/blocks
// ---------------------------------------------------------------------------

/// Delete a block; child blocks and attached items cascade.
pub async fn delete(
    State(state): State<AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<impl IntoResponse> {
    let id = params
        .id
        .ok_or_else(|| AppError::BadRequest("Block ID required".into()))?;
    if BlockRepo::delete(&state.pool, &id).await? {
        tracing::info!(%id, "Time block deleted");
        Ok(Json(MessageResponse {
            message: "Time block deleted successfully",
        }))
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "TimeBlock",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// POST /timeline/blocks/wrap
// ---------------------------------------------------------------------------

/// Wrap a set of sibling blocks under a newly created parent block.
pub async fn wrap(
    State(state): State<AppState>,
    Json(input): Json<WrapRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(user_id), Some(block_ids), Some(parent_name), Some(parent_type)) = (
        input.user_id,
        input.block_ids,
        input.parent_name,
        input.parent_type,
    ) else {
        return Err(AppError::BadRequest("Missing required fields".into()));
    };
    if block_ids.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".into()));
    }
    validate_name("parentName", &parent_name)?;
    validate_block_type(&parent_type)?;

    let wrapper = BlockRepo::wrap(
        &state.pool,
        &WrapBlocks {
            user_id,
            block_ids,
            parent_name,
            parent_type,
            parent_custom_type: input.parent_custom_type,
            parent_start_date: input.parent_start_date,
            parent_end_date: input.parent_end_date,
        },
    )
    .await?;
    tracing::info!(parent_id = %wrapper.id, "Blocks wrapped");
    Ok(Json(WrapResponse {
        parent_id: wrapper.id,
        message: "Blocks wrapped successfully",
    }))
}
