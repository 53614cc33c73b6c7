//! Repository for curriculum topic lookups (read-only).

use crate::models::topic::{Topic, TopicDetail};
use crate::DbPool;

pub struct TopicRepo;

impl TopicRepo {
    /// List all topics without content, ordered by tier, module, and
    /// position.
    pub async fn list(pool: &DbPool) -> Result<Vec<Topic>, sqlx::Error> {
        sqlx::query_as::<_, Topic>(
            "SELECT t.id, t.module_id, t.tier_id, t.title, t.description, t.position \
             FROM topics t \
             LEFT JOIN modules m ON t.module_id = m.id \
             LEFT JOIN tiers ti ON t.tier_id = ti.id \
             ORDER BY ti.position, m.position, t.position",
        )
        .fetch_all(pool)
        .await
    }

    /// Fetch one topic with its content and the titles of its module and
    /// tier.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<TopicDetail>, sqlx::Error> {
        sqlx::query_as::<_, TopicDetail>(
            "SELECT t.id, t.module_id, t.tier_id, t.title, t.description, t.content, \
                    t.position, m.title AS module_title, ti.title AS tier_title \
             FROM topics t \
             LEFT JOIN modules m ON t.module_id = m.id \
             LEFT JOIN tiers ti ON t.tier_id = ti.id \
             WHERE t.id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
