//! Repository for the entity directory (read-only), including the batched
//! entity-to-topic lookup.

use journey_core::error::CoreError;

use crate::error::DbError;
use crate::models::entity::{Entity, EntityTopicRow};
use crate::DbPool;

/// Column list for entity queries.
const COLUMNS: &str = "id, name, type, description, tags, properties, active";

pub struct EntityRepo;

impl EntityRepo {
    /// List entities, optionally filtered to a set of types (already split
    /// from the comma-separated query form by the caller). Inactive entities
    /// are hidden unless `include_inactive` is set.
    pub async fn list(
        pool: &DbPool,
        types: &[String],
        include_inactive: bool,
    ) -> Result<Vec<Entity>, sqlx::Error> {
        let active_filter = if include_inactive { "1 = 1" } else { "active = 1" };
        let mut query = format!("SELECT {COLUMNS} FROM entities WHERE {active_filter}");
        if !types.is_empty() {
            let placeholders = vec!["?"; types.len()].join(", ");
            query.push_str(&format!(" AND type IN ({placeholders})"));
        }
        query.push_str(" ORDER BY type, name");

        let mut q = sqlx::query_as::<_, Entity>(&query);
        for ty in types {
            q = q.bind(ty);
        }
        q.fetch_all(pool).await
    }

    /// Find an entity by its primary key.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Entity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entities WHERE id = ?");
        sqlx::query_as::<_, Entity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Batched lookup: topics linked to any of the given entities, in one
    /// query, ordered by entity then curriculum position. The caller groups
    /// rows by entity and relationship type. Empty input is a validation
    /// error, not an empty result.
    pub async fn topics_for_entities(
        pool: &DbPool,
        entity_ids: &[String],
    ) -> Result<Vec<EntityTopicRow>, DbError> {
        if entity_ids.is_empty() {
            return Err(CoreError::Validation("entityIds must not be empty".into()).into());
        }
        let placeholders = vec!["?"; entity_ids.len()].join(", ");
        let query = format!(
            "SELECT et.entity_id, t.id, t.title, t.tier_id, t.module_id, t.position, \
                    ti.position AS tier_position, m.position AS module_position, \
                    et.relationship_type \
             FROM entity_topics et \
             JOIN topics t ON et.topic_id = t.id \
             LEFT JOIN modules m ON t.module_id = m.id \
             LEFT JOIN tiers ti ON t.tier_id = ti.id \
             WHERE et.entity_id IN ({placeholders}) \
             ORDER BY et.entity_id, ti.position, m.position, t.position"
        );
        let mut q = sqlx::query_as::<_, EntityTopicRow>(&query);
        for id in entity_ids {
            q = q.bind(id);
        }
        Ok(q.fetch_all(pool).await?)
    }
}
