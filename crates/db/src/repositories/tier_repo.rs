//! Repository for the journey tier/module hierarchy (read-only).

use crate::models::tier::{Module, Tier, TierWithModules};
use crate::DbPool;

pub struct TierRepo;

impl TierRepo {
    /// List all tiers with their modules nested, both ordered by position.
    pub async fn list_with_modules(pool: &DbPool) -> Result<Vec<TierWithModules>, sqlx::Error> {
        let tiers = sqlx::query_as::<_, Tier>(
            "SELECT id, title, description, position FROM tiers ORDER BY position",
        )
        .fetch_all(pool)
        .await?;

        let modules = sqlx::query_as::<_, Module>(
            "SELECT id, tier_id, title, description, position FROM modules ORDER BY position",
        )
        .fetch_all(pool)
        .await?;

        Ok(tiers
            .into_iter()
            .map(|tier| {
                let modules = modules
                    .iter()
                    .filter(|m| m.tier_id == tier.id)
                    .cloned()
                    .collect();
                TierWithModules { tier, modules }
            })
            .collect())
    }
}
