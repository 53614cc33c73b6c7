//! Timeline item model and DTOs. Items are leaf events attached to exactly
//! one block.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use journey_core::types::{DbId, Timestamp};

/// A row from the `timeline_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub id: DbId,
    pub block_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub related_topics: Json<Vec<String>>,
    pub url: Option<String>,
    pub reminder: Option<Json<serde_json::Value>>,
    pub date: Option<String>,
    pub position: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new timeline item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimelineItem {
    pub block_id: DbId,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: Option<String>,
    pub related_topics: Option<Vec<String>>,
    pub url: Option<String>,
    pub reminder: Option<serde_json::Value>,
    pub date: Option<String>,
    pub position: Option<i64>,
}

/// DTO for patching an existing timeline item. Nullable columns take a
/// double `Option` so an explicit `null` clears them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimelineItem {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::models::patch_field")]
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub related_topics: Option<Vec<String>>,
    #[serde(default, deserialize_with = "crate::models::patch_field")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::patch_field")]
    pub reminder: Option<Option<serde_json::Value>>,
    #[serde(default, deserialize_with = "crate::models::patch_field")]
    pub date: Option<Option<String>>,
    pub position: Option<i64>,
}
