//! Topic models for curriculum lookups.

use serde::Serialize;
use sqlx::FromRow;

use journey_core::types::DbId;

/// A row from the `topics` table, without the (potentially large) content
/// column. Used for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub id: DbId,
    pub module_id: Option<DbId>,
    pub tier_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub position: i64,
}

/// A single topic with its content and the titles of its module and tier.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopicDetail {
    pub id: DbId,
    pub module_id: Option<DbId>,
    pub tier_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub position: i64,
    pub module_title: Option<String>,
    pub tier_title: Option<String>,
}
