//! Repository for the `timeline_items` table.

use sqlx::types::Json;

use journey_core::error::CoreError;

use crate::error::DbError;
use crate::models::timeline_item::{CreateTimelineItem, TimelineItem, UpdateTimelineItem};
use crate::DbPool;

/// Column list for timeline item queries.
const COLUMNS: &str = "id, block_id, type, title, description, completed, \
    related_topics, url, reminder, date, position, created_at, updated_at";

const TOUCH: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Provides CRUD operations for timeline items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert an item row with a caller-supplied id. Shared by `create` and
    /// template application.
    pub(crate) async fn insert<'e, E>(
        executor: E,
        id: &str,
        input: &CreateTimelineItem,
    ) -> Result<TimelineItem, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let query = format!(
            "INSERT INTO timeline_items \
                (id, block_id, type, title, description, related_topics, url, reminder, \
                 date, position) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimelineItem>(&query)
            .bind(id)
            .bind(&input.block_id)
            .bind(&input.item_type)
            .bind(&input.title)
            .bind(&input.description)
            .bind(Json(input.related_topics.clone().unwrap_or_default()))
            .bind(&input.url)
            .bind(input.reminder.as_ref().map(Json))
            .bind(&input.date)
            .bind(input.position.unwrap_or(0))
            .fetch_one(executor)
            .await
    }

    /// Insert a new item, returning the created row.
    pub async fn create(
        pool: &DbPool,
        input: &CreateTimelineItem,
    ) -> Result<TimelineItem, sqlx::Error> {
        Self::insert(pool, &crate::new_id(), input).await
    }

    /// Find an item by its primary key.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<TimelineItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM timeline_items WHERE id = ?");
        sqlx::query_as::<_, TimelineItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all items attached to a block, ordered by position.
    pub async fn list_by_block(
        pool: &DbPool,
        block_id: &str,
    ) -> Result<Vec<TimelineItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM timeline_items WHERE block_id = ? ORDER BY position"
        );
        sqlx::query_as::<_, TimelineItem>(&query)
            .bind(block_id)
            .fetch_all(pool)
            .await
    }

    /// Batched lookup: all items for any of the given blocks in one query,
    /// ordered by block then position. Empty input is a validation error,
    /// not an empty result.
    pub async fn list_by_blocks(
        pool: &DbPool,
        block_ids: &[String],
    ) -> Result<Vec<TimelineItem>, DbError> {
        if block_ids.is_empty() {
            return Err(CoreError::Validation("blockIds must not be empty".into()).into());
        }
        let placeholders = vec!["?"; block_ids.len()].join(", ");
        let query = format!(
            "SELECT {COLUMNS} FROM timeline_items \
             WHERE block_id IN ({placeholders}) \
             ORDER BY block_id, position"
        );
        let mut q = sqlx::query_as::<_, TimelineItem>(&query);
        for id in block_ids {
            q = q.bind(id);
        }
        Ok(q.fetch_all(pool).await?)
    }

    /// Patch an item. Only present fields are applied; nullable fields
    /// carry an inner `Option` so an explicit `null` clears them. Returns
    /// `None` when the id does not exist.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        input: &UpdateTimelineItem,
    ) -> Result<Option<TimelineItem>, sqlx::Error> {
        let mut builder =
            sqlx::QueryBuilder::<sqlx::Sqlite>::new("UPDATE timeline_items SET ");
        let mut sets = builder.separated(", ");
        if let Some(item_type) = &input.item_type {
            sets.push("type = ").push_bind_unseparated(item_type.clone());
        }
        if let Some(title) = &input.title {
            sets.push("title = ").push_bind_unseparated(title.clone());
        }
        if let Some(description) = &input.description {
            sets.push("description = ")
                .push_bind_unseparated(description.clone());
        }
        if let Some(completed) = input.completed {
            sets.push("completed = ").push_bind_unseparated(completed);
        }
        if let Some(related_topics) = &input.related_topics {
            sets.push("related_topics = ")
                .push_bind_unseparated(Json(related_topics.clone()));
        }
        if let Some(url) = &input.url {
            sets.push("url = ").push_bind_unseparated(url.clone());
        }
        if let Some(reminder) = &input.reminder {
            sets.push("reminder = ")
                .push_bind_unseparated(reminder.clone().map(Json));
        }
        if let Some(date) = &input.date {
            sets.push("date = ").push_bind_unseparated(date.clone());
        }
        if let Some(position) = input.position {
            sets.push("position = ").push_bind_unseparated(position);
        }
        sets.push(format!("updated_at = {TOUCH}"));
        builder.push(" WHERE id = ");
        builder.push_bind(id.to_string());
        builder.push(format!(" RETURNING {COLUMNS}"));

        builder
            .build_query_as::<TimelineItem>()
            .fetch_optional(pool)
            .await
    }

    /// Delete an item by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM timeline_items WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
