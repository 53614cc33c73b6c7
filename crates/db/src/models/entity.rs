//! Entity (mentor/organization) models.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use journey_core::types::DbId;

/// A row from the `entities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Entity {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub entity_type: String,
    pub description: Option<String>,
    pub tags: Json<Vec<String>>,
    pub properties: Json<serde_json::Value>,
    pub active: bool,
}

/// One row of the batched entity-to-topic lookup: an `entity_topics` link
/// joined with the topic and the positions of its module and tier.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EntityTopicRow {
    pub entity_id: DbId,
    pub id: DbId,
    pub title: String,
    pub tier_id: Option<DbId>,
    pub module_id: Option<DbId>,
    pub position: i64,
    pub tier_position: Option<i64>,
    pub module_position: Option<i64>,
    pub relationship_type: String,
}
