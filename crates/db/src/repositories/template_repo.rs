//! Repository for the `timeline_templates` table, including the
//! transactional apply operation that materializes a blueprint.

use sqlx::types::Json;

use journey_core::error::CoreError;
use journey_core::timeline::{parse_structure, TemplateBlockSpec};

use crate::error::DbError;
use crate::models::timeline_block::{CreateTimeBlock, TimeBlock};
use crate::models::timeline_item::CreateTimelineItem;
use crate::models::timeline_template::{CreateTimelineTemplate, TimelineTemplate};
use crate::repositories::{BlockRepo, ItemRepo};
use crate::DbPool;

/// Column list for template queries.
const COLUMNS: &str = "id, user_id, name, description, structure, is_public, \
    use_count, created_at";

/// Provides read/create/apply operations for timeline templates. Templates
/// are never updated or deleted through the API.
pub struct TemplateRepo;

impl TemplateRepo {
    /// List templates: public ones only, or public plus a user's own.
    /// Most-used templates sort first.
    pub async fn list(
        pool: &DbPool,
        public_only: bool,
        user_id: Option<&str>,
    ) -> Result<Vec<TimelineTemplate>, sqlx::Error> {
        let filter = if public_only {
            "WHERE is_public = 1"
        } else if user_id.is_some() {
            "WHERE is_public = 1 OR user_id = ?"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM timeline_templates {filter} \
             ORDER BY use_count DESC, created_at DESC"
        );
        let mut q = sqlx::query_as::<_, TimelineTemplate>(&query);
        if !public_only {
            if let Some(user_id) = user_id {
                q = q.bind(user_id);
            }
        }
        q.fetch_all(pool).await
    }

    /// Find a template by its primary key.
    pub async fn find_by_id(
        pool: &DbPool,
        id: &str,
    ) -> Result<Option<TimelineTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM timeline_templates WHERE id = ?");
        sqlx::query_as::<_, TimelineTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new template. The structure is persisted verbatim; it is
    /// only parsed and validated when applied.
    pub async fn create(
        pool: &DbPool,
        input: &CreateTimelineTemplate,
    ) -> Result<TimelineTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO timeline_templates (id, user_id, name, description, structure, is_public) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimelineTemplate>(&query)
            .bind(crate::new_id())
            .bind(&input.user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(Json(&input.structure))
            .bind(input.is_public.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// Materialize a template for a user: create a fresh block for every
    /// block node (the root under `parent_id`) and a fresh item for every
    /// item node, all inside one transaction.
    ///
    /// Returns the created blocks in pre-order so the caller can render the
    /// result without a follow-up read.
    pub async fn apply(
        pool: &DbPool,
        template_id: &str,
        user_id: &str,
        parent_id: Option<&str>,
    ) -> Result<Vec<TimeBlock>, DbError> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM timeline_templates WHERE id = ?");
        let template = sqlx::query_as::<_, TimelineTemplate>(&select)
            .bind(template_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "TimelineTemplate",
                id: template_id.to_string(),
            })?;

        let root = parse_structure(&template.structure)?;

        sqlx::query("UPDATE timeline_templates SET use_count = use_count + 1 WHERE id = ?")
            .bind(template_id)
            .execute(&mut *tx)
            .await?;

        // Explicit stack instead of async recursion; children are pushed in
        // reverse so creation order is pre-order.
        let mut created = Vec::new();
        let mut stack: Vec<(TemplateBlockSpec, Option<String>, i64)> =
            vec![(root, parent_id.map(str::to_string), 0)];

        while let Some((spec, parent, position)) = stack.pop() {
            let block = BlockRepo::insert(
                &mut *tx,
                &crate::new_id(),
                &CreateTimeBlock {
                    user_id: user_id.to_string(),
                    parent_id: parent,
                    name: spec.name.clone(),
                    block_type: spec.block_type.clone(),
                    custom_type: spec.custom_type.clone(),
                    position: Some(position),
                    metadata: spec.metadata.clone(),
                    start_date: None,
                    end_date: None,
                },
            )
            .await?;

            for (index, item) in spec.items.iter().enumerate() {
                ItemRepo::insert(
                    &mut *tx,
                    &crate::new_id(),
                    &CreateTimelineItem {
                        block_id: block.id.clone(),
                        item_type: item.item_type.clone(),
                        title: item.title.clone(),
                        description: item.description.clone(),
                        related_topics: Some(item.related_topics.clone()),
                        url: item.url.clone(),
                        reminder: item.reminder.clone(),
                        date: None,
                        position: Some(index as i64),
                    },
                )
                .await?;
            }

            for (index, child) in spec.children.into_iter().enumerate().rev() {
                stack.push((child, Some(block.id.clone()), index as i64));
            }
            created.push(block);
        }

        tx.commit().await?;
        tracing::debug!(
            template_id,
            blocks = created.len(),
            "Applied template"
        );
        Ok(created)
    }
}
