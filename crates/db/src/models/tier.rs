//! Tier and module models for the journey hierarchy.

use serde::Serialize;
use sqlx::FromRow;

use journey_core::types::DbId;

/// A row from the `tiers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tier {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub position: i64,
}

/// A row from the `modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Module {
    pub id: DbId,
    pub tier_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub position: i64,
}

/// A tier with its modules nested, both ordered by position.
#[derive(Debug, Clone, Serialize)]
pub struct TierWithModules {
    #[serde(flatten)]
    pub tier: Tier,
    pub modules: Vec<Module>,
}
