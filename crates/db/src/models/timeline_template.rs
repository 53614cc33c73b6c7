//! Timeline template model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use journey_core::types::{DbId, Timestamp};

/// A row from the `timeline_templates` table. `structure` is a blueprint
/// describing a block/item subtree, independent of any live row.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineTemplate {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub structure: Json<serde_json::Value>,
    pub is_public: bool,
    pub use_count: i64,
    pub created_at: Timestamp,
}

/// DTO for creating a new template. The structure is stored verbatim and
/// only validated when applied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimelineTemplate {
    pub user_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub structure: serde_json::Value,
    pub is_public: Option<bool>,
}
