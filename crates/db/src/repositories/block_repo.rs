//! Repository for the `time_blocks` table, including the transactional
//! wrap operation.

use sqlx::types::Json;

use journey_core::error::CoreError;

use crate::error::DbError;
use crate::models::timeline_block::{CreateTimeBlock, TimeBlock, UpdateTimeBlock, WrapBlocks};
use crate::DbPool;

/// Column list for time block queries.
const COLUMNS: &str = "id, user_id, parent_id, name, type, custom_type, position, \
    collapsed, metadata, start_date, end_date, created_at, updated_at";

/// SQL expression refreshing `updated_at` on writes.
const TOUCH: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Provides CRUD and wrap operations for time blocks.
pub struct BlockRepo;

impl BlockRepo {
    /// Insert a block row with a caller-supplied id. Shared by `create`,
    /// `wrap`, and template application (which runs inside a transaction).
    pub(crate) async fn insert<'e, E>(
        executor: E,
        id: &str,
        input: &CreateTimeBlock,
    ) -> Result<TimeBlock, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let query = format!(
            "INSERT INTO time_blocks \
                (id, user_id, parent_id, name, type, custom_type, position, metadata, \
                 start_date, end_date) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeBlock>(&query)
            .bind(id)
            .bind(&input.user_id)
            .bind(&input.parent_id)
            .bind(&input.name)
            .bind(&input.block_type)
            .bind(&input.custom_type)
            .bind(input.position.unwrap_or(0))
            .bind(Json(input.metadata.clone().unwrap_or_default()))
            .bind(&input.start_date)
            .bind(&input.end_date)
            .fetch_one(executor)
            .await
    }

    /// Insert a new block, returning the created row.
    pub async fn create(pool: &DbPool, input: &CreateTimeBlock) -> Result<TimeBlock, sqlx::Error> {
        Self::insert(pool, &crate::new_id(), input).await
    }

    /// Find a block by its primary key.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<TimeBlock>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_blocks WHERE id = ?");
        sqlx::query_as::<_, TimeBlock>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all blocks owned by a user, ordered by position. The result is
    /// flat; callers rebuild the forest from `parent_id`/`position`.
    pub async fn list(pool: &DbPool, user_id: &str) -> Result<Vec<TimeBlock>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_blocks WHERE user_id = ? ORDER BY position"
        );
        sqlx::query_as::<_, TimeBlock>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Patch a block. Only present fields are applied; nullable fields
    /// carry an inner `Option` so an explicit `null` clears them. Returns
    /// `None` when the id does not exist.
    ///
    /// A reparent (`parent_id = Some(Some(_))`) is checked before the write:
    /// the new parent must exist, belong to the same user, and must not be
    /// the block itself or one of its descendants.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        input: &UpdateTimeBlock,
    ) -> Result<Option<TimeBlock>, DbError> {
        let mut tx = pool.begin().await?;

        if let Some(Some(parent_id)) = &input.parent_id {
            Self::check_reparent(&mut tx, id, parent_id).await?;
        }

        let mut builder =
            sqlx::QueryBuilder::<sqlx::Sqlite>::new("UPDATE time_blocks SET ");
        let mut sets = builder.separated(", ");
        if let Some(parent_id) = &input.parent_id {
            sets.push("parent_id = ")
                .push_bind_unseparated(parent_id.clone());
        }
        if let Some(name) = &input.name {
            sets.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(block_type) = &input.block_type {
            sets.push("type = ").push_bind_unseparated(block_type.clone());
        }
        if let Some(custom_type) = &input.custom_type {
            sets.push("custom_type = ")
                .push_bind_unseparated(custom_type.clone());
        }
        if let Some(position) = input.position {
            sets.push("position = ").push_bind_unseparated(position);
        }
        if let Some(collapsed) = input.collapsed {
            sets.push("collapsed = ").push_bind_unseparated(collapsed);
        }
        if let Some(metadata) = &input.metadata {
            sets.push("metadata = ")
                .push_bind_unseparated(Json(metadata.clone()));
        }
        if let Some(start_date) = &input.start_date {
            sets.push("start_date = ")
                .push_bind_unseparated(start_date.clone());
        }
        if let Some(end_date) = &input.end_date {
            sets.push("end_date = ")
                .push_bind_unseparated(end_date.clone());
        }
        sets.push(format!("updated_at = {TOUCH}"));
        builder.push(" WHERE id = ");
        builder.push_bind(id.to_string());
        builder.push(format!(" RETURNING {COLUMNS}"));

        let updated = builder
            .build_query_as::<TimeBlock>()
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Validate a proposed reparent of `id` under `parent_id`. A missing
    /// block is left to the subsequent UPDATE, which returns no row.
    async fn check_reparent(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        id: &str,
        parent_id: &str,
    ) -> Result<(), DbError> {
        let owner: Option<String> =
            sqlx::query_scalar("SELECT user_id FROM time_blocks WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut **tx)
                .await?;
        let Some(owner) = owner else {
            return Ok(());
        };

        if parent_id == id {
            return Err(
                CoreError::Validation("A block cannot be its own parent".into()).into(),
            );
        }

        let parent: Option<(String, Option<String>)> =
            sqlx::query_as("SELECT user_id, parent_id FROM time_blocks WHERE id = ?")
                .bind(parent_id)
                .fetch_optional(&mut **tx)
                .await?;
        let Some((parent_owner, mut cursor)) = parent else {
            return Err(CoreError::Validation(format!(
                "Parent block {parent_id} not found for user"
            ))
            .into());
        };
        if parent_owner != owner {
            return Err(CoreError::Validation(format!(
                "Parent block {parent_id} not found for user"
            ))
            .into());
        }

        // Walk up from the proposed parent; hitting the block itself would
        // close a cycle.
        while let Some(ancestor_id) = cursor {
            if ancestor_id == id {
                return Err(CoreError::Validation(
                    "Cannot move a block under one of its descendants".into(),
                )
                .into());
            }
            cursor = sqlx::query_scalar("SELECT parent_id FROM time_blocks WHERE id = ?")
                .bind(&ancestor_id)
                .fetch_optional(&mut **tx)
                .await?
                .flatten();
        }
        Ok(())
    }

    /// Delete a block by id. Child blocks and items are removed by the
    /// `ON DELETE CASCADE` foreign keys. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_blocks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Wrap a set of existing sibling blocks under a newly created parent.
    ///
    /// Runs in one transaction: either the wrapper exists and every listed
    /// block hangs under it, or nothing changed. Wrapped blocks keep their
    /// `position` values; the wrapper takes the minimum of them and the
    /// siblings' former parent.
    pub async fn wrap(pool: &DbPool, input: &WrapBlocks) -> Result<TimeBlock, DbError> {
        let mut seen = std::collections::HashSet::new();
        let block_ids: Vec<&str> = input
            .block_ids
            .iter()
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect();
        if block_ids.is_empty() {
            return Err(CoreError::Validation("No blocks found to wrap".into()).into());
        }

        let mut tx = pool.begin().await?;

        let placeholders = vec!["?"; block_ids.len()].join(", ");
        let select = format!(
            "SELECT {COLUMNS} FROM time_blocks \
             WHERE id IN ({placeholders}) AND user_id = ?"
        );
        let mut query = sqlx::query_as::<_, TimeBlock>(&select);
        for id in &block_ids {
            query = query.bind(*id);
        }
        let blocks = query.bind(&input.user_id).fetch_all(&mut *tx).await?;

        if blocks.is_empty() {
            return Err(CoreError::Validation("No blocks found to wrap".into()).into());
        }
        if blocks.len() != block_ids.len() {
            let missing = block_ids
                .iter()
                .find(|id| !blocks.iter().any(|b| b.id == **id))
                .map(|id| id.to_string())
                .unwrap_or_default();
            return Err(CoreError::NotFound {
                entity: "TimeBlock",
                id: missing,
            }
            .into());
        }

        let shared_parent = blocks[0].parent_id.clone();
        if blocks.iter().any(|b| b.parent_id != shared_parent) {
            return Err(
                CoreError::Validation("Can only wrap blocks that are siblings".into()).into(),
            );
        }
        let min_position = blocks.iter().map(|b| b.position).min().unwrap_or(0);

        let wrapper = Self::insert(
            &mut *tx,
            &crate::new_id(),
            &CreateTimeBlock {
                user_id: input.user_id.clone(),
                parent_id: shared_parent,
                name: input.parent_name.clone(),
                block_type: input.parent_type.clone(),
                custom_type: input.parent_custom_type.clone(),
                position: Some(min_position),
                metadata: None,
                start_date: input.parent_start_date.clone(),
                end_date: input.parent_end_date.clone(),
            },
        )
        .await?;

        let reparent = format!(
            "UPDATE time_blocks SET parent_id = ?, updated_at = {TOUCH} \
             WHERE id IN ({placeholders})"
        );
        let mut query = sqlx::query(&reparent).bind(&wrapper.id);
        for id in &block_ids {
            query = query.bind(*id);
        }
        query.execute(&mut *tx).await?;

        tx.commit().await?;
        tracing::debug!(
            wrapper_id = %wrapper.id,
            wrapped = block_ids.len(),
            "Wrapped blocks under new parent"
        );
        Ok(wrapper)
    }
}
