//! Time block model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use journey_core::timeline::Metadata;
use journey_core::types::{DbId, Timestamp};

/// A row from the `time_blocks` table. Blocks form a forest per user via
/// `parent_id`; `position` orders siblings.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub id: DbId,
    pub user_id: DbId,
    pub parent_id: Option<DbId>,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub block_type: String,
    pub custom_type: Option<String>,
    pub position: i64,
    pub collapsed: bool,
    pub metadata: Json<Metadata>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new time block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeBlock {
    pub user_id: DbId,
    pub parent_id: Option<DbId>,
    pub name: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub custom_type: Option<String>,
    pub position: Option<i64>,
    pub metadata: Option<Metadata>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// DTO for patching an existing time block. Unspecified fields are left
/// untouched; nullable columns take a double `Option` so an explicit `null`
/// clears them (e.g. `parentId: null` moves a block back to top level).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimeBlock {
    #[serde(default, deserialize_with = "crate::models::patch_field")]
    pub parent_id: Option<Option<DbId>>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub block_type: Option<String>,
    #[serde(default, deserialize_with = "crate::models::patch_field")]
    pub custom_type: Option<Option<String>>,
    pub position: Option<i64>,
    pub collapsed: Option<bool>,
    pub metadata: Option<Metadata>,
    #[serde(default, deserialize_with = "crate::models::patch_field")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::patch_field")]
    pub end_date: Option<Option<String>>,
}

/// Parameters for the wrap operation: a new parent synthesized above a set
/// of existing sibling blocks.
#[derive(Debug, Clone)]
pub struct WrapBlocks {
    pub user_id: DbId,
    pub block_ids: Vec<DbId>,
    pub parent_name: String,
    pub parent_type: String,
    pub parent_custom_type: Option<String>,
    pub parent_start_date: Option<String>,
    pub parent_end_date: Option<String>,
}
