//! Integration tests for the two transactional operations: wrapping
//! sibling blocks under a new parent, and applying a template blueprint.

use assert_matches::assert_matches;
use serde_json::json;
use sqlx::SqlitePool;

use journey_core::error::CoreError;
use journey_db::error::DbError;
use journey_db::models::timeline_block::{CreateTimeBlock, WrapBlocks};
use journey_db::models::timeline_template::CreateTimelineTemplate;
use journey_db::repositories::{BlockRepo, ItemRepo, TemplateRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_block(
    pool: &SqlitePool,
    user_id: &str,
    name: &str,
    parent_id: Option<&str>,
    position: i64,
) -> journey_db::models::timeline_block::TimeBlock {
    BlockRepo::create(
        pool,
        &CreateTimeBlock {
            user_id: user_id.to_string(),
            parent_id: parent_id.map(str::to_string),
            name: name.to_string(),
            block_type: "week".to_string(),
            custom_type: None,
            position: Some(position),
            metadata: None,
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap()
}

fn wrap_input(user_id: &str, block_ids: &[&str], parent_name: &str) -> WrapBlocks {
    WrapBlocks {
        user_id: user_id.to_string(),
        block_ids: block_ids.iter().map(|s| s.to_string()).collect(),
        parent_name: parent_name.to_string(),
        parent_type: "phase".to_string(),
        parent_custom_type: None,
        parent_start_date: None,
        parent_end_date: None,
    }
}

async fn count_blocks(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM time_blocks")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn seed_template(
    pool: &SqlitePool,
    name: &str,
    structure: serde_json::Value,
) -> journey_db::models::timeline_template::TimelineTemplate {
    TemplateRepo::create(
        pool,
        &CreateTimelineTemplate {
            user_id: Some("author".to_string()),
            name: name.to_string(),
            description: None,
            structure,
            is_public: Some(true),
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Wrap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_wrap_reparents_selected_siblings_only(pool: SqlitePool) {
    let b1 = seed_block(&pool, "u1", "Week 1", None, 0).await;
    let b2 = seed_block(&pool, "u1", "Week 2", None, 1).await;
    let b3 = seed_block(&pool, "u1", "Week 3", None, 2).await;

    let wrapper = BlockRepo::wrap(&pool, &wrap_input("u1", &[&b1.id, &b2.id], "Sprint"))
        .await
        .unwrap();

    assert_eq!(wrapper.name, "Sprint");
    assert_eq!(wrapper.parent_id, None);
    // Wrapper takes the minimum position of the wrapped blocks.
    assert_eq!(wrapper.position, 0);

    let w1 = BlockRepo::find_by_id(&pool, &b1.id).await.unwrap().unwrap();
    let w2 = BlockRepo::find_by_id(&pool, &b2.id).await.unwrap().unwrap();
    let w3 = BlockRepo::find_by_id(&pool, &b3.id).await.unwrap().unwrap();

    assert_eq!(w1.parent_id.as_deref(), Some(wrapper.id.as_str()));
    assert_eq!(w2.parent_id.as_deref(), Some(wrapper.id.as_str()));
    // Unlisted sibling stays where it was.
    assert_eq!(w3.parent_id, None);

    // Wrapped blocks keep their original positions.
    assert_eq!(w1.position, 0);
    assert_eq!(w2.position, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_wrap_nested_siblings_inherits_their_parent(pool: SqlitePool) {
    let outer = seed_block(&pool, "u1", "Year", None, 0).await;
    let c1 = seed_block(&pool, "u1", "Q1", Some(&outer.id), 0).await;
    let c2 = seed_block(&pool, "u1", "Q2", Some(&outer.id), 1).await;

    let wrapper = BlockRepo::wrap(&pool, &wrap_input("u1", &[&c1.id, &c2.id], "H1"))
        .await
        .unwrap();

    assert_eq!(wrapper.parent_id.as_deref(), Some(outer.id.as_str()));
    let c1 = BlockRepo::find_by_id(&pool, &c1.id).await.unwrap().unwrap();
    assert_eq!(c1.parent_id.as_deref(), Some(wrapper.id.as_str()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_wrap_deduplicates_repeated_ids(pool: SqlitePool) {
    let b1 = seed_block(&pool, "u1", "Week 1", None, 0).await;

    let wrapper = BlockRepo::wrap(&pool, &wrap_input("u1", &[&b1.id, &b1.id], "Wrap"))
        .await
        .unwrap();

    let b1 = BlockRepo::find_by_id(&pool, &b1.id).await.unwrap().unwrap();
    assert_eq!(b1.parent_id.as_deref(), Some(wrapper.id.as_str()));
    assert_eq!(count_blocks(&pool).await, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_wrap_unknown_id_fails_without_side_effects(pool: SqlitePool) {
    let b1 = seed_block(&pool, "u1", "Week 1", None, 0).await;
    let before = count_blocks(&pool).await;

    let err = BlockRepo::wrap(&pool, &wrap_input("u1", &[&b1.id, "ghost"], "Wrap"))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound { .. }));

    // Nothing was created and nothing moved.
    assert_eq!(count_blocks(&pool).await, before);
    let b1 = BlockRepo::find_by_id(&pool, &b1.id).await.unwrap().unwrap();
    assert_eq!(b1.parent_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_wrap_other_users_blocks_is_rejected(pool: SqlitePool) {
    let theirs = seed_block(&pool, "u2", "Week 1", None, 0).await;

    let err = BlockRepo::wrap(&pool, &wrap_input("u1", &[&theirs.id], "Wrap"))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_wrap_non_siblings_is_rejected(pool: SqlitePool) {
    let parent = seed_block(&pool, "u1", "Year", None, 0).await;
    let child = seed_block(&pool, "u1", "Q1", Some(&parent.id), 0).await;
    let root = seed_block(&pool, "u1", "Loose", None, 1).await;
    let before = count_blocks(&pool).await;

    let err = BlockRepo::wrap(&pool, &wrap_input("u1", &[&child.id, &root.id], "Wrap"))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
    assert_eq!(count_blocks(&pool).await, before);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_wrap_empty_id_list_is_rejected(pool: SqlitePool) {
    let err = BlockRepo::wrap(&pool, &wrap_input("u1", &[], "Wrap"))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_template_list_filters_and_orders(pool: SqlitePool) {
    seed_template(&pool, "public one", json!({"name": "A", "type": "week"})).await;
    let private = TemplateRepo::create(
        &pool,
        &CreateTimelineTemplate {
            user_id: Some("u1".to_string()),
            name: "mine".to_string(),
            description: None,
            structure: json!({"name": "B", "type": "week"}),
            is_public: Some(false),
        },
    )
    .await
    .unwrap();

    let public = TemplateRepo::list(&pool, true, None).await.unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].name, "public one");

    let visible = TemplateRepo::list(&pool, false, Some("u1")).await.unwrap();
    assert_eq!(visible.len(), 2);

    let other = TemplateRepo::list(&pool, false, Some("u2")).await.unwrap();
    assert_eq!(other.len(), 1);
    assert_ne!(other[0].id, private.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_creates_nested_blocks_and_items(pool: SqlitePool) {
    let structure = json!({
        "name": "Research Sprint",
        "type": "sprint",
        "metadata": {"focus": "interpretability"},
        "items": [
            {"type": "task", "title": "Pick a paper"},
            {"type": "milestone", "title": "Replication done", "relatedTopics": ["replication"]}
        ],
        "children": [
            {"name": "Week 1", "type": "week"},
            {"name": "Week 2", "type": "week", "items": [
                {"type": "deadline", "title": "Writeup due"}
            ]}
        ]
    });
    let template = seed_template(&pool, "sprint", structure).await;

    let blocks = TemplateRepo::apply(&pool, &template.id, "u1", None)
        .await
        .unwrap();

    // Pre-order: root, then children in declaration order.
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].name, "Research Sprint");
    assert_eq!(blocks[1].name, "Week 1");
    assert_eq!(blocks[2].name, "Week 2");

    let root = &blocks[0];
    assert_eq!(root.parent_id, None);
    assert_eq!(root.user_id, "u1");
    assert_eq!(blocks[1].parent_id.as_deref(), Some(root.id.as_str()));
    assert_eq!(blocks[2].parent_id.as_deref(), Some(root.id.as_str()));
    assert_eq!(blocks[1].position, 0);
    assert_eq!(blocks[2].position, 1);

    let root_items = ItemRepo::list_by_block(&pool, &root.id).await.unwrap();
    assert_eq!(root_items.len(), 2);
    assert_eq!(root_items[0].title, "Pick a paper");
    assert_eq!(root_items[1].related_topics.0, vec!["replication"]);

    let week2_items = ItemRepo::list_by_block(&pool, &blocks[2].id).await.unwrap();
    assert_eq!(week2_items.len(), 1);
    assert_eq!(week2_items[0].item_type, "deadline");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_under_existing_parent_and_counts_use(pool: SqlitePool) {
    let parent = seed_block(&pool, "u1", "2026", None, 0).await;
    let template = seed_template(&pool, "simple", json!({"name": "Q1", "type": "quarter"})).await;
    assert_eq!(template.use_count, 0);

    let blocks = TemplateRepo::apply(&pool, &template.id, "u1", Some(&parent.id))
        .await
        .unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].parent_id.as_deref(), Some(parent.id.as_str()));

    let reloaded = TemplateRepo::find_by_id(&pool, &template.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.use_count, 1);

    TemplateRepo::apply(&pool, &template.id, "u1", None)
        .await
        .unwrap();
    let reloaded = TemplateRepo::find_by_id(&pool, &template.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.use_count, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_unknown_template_is_not_found(pool: SqlitePool) {
    let err = TemplateRepo::apply(&pool, "ghost", "u1", None)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::NotFound { .. }));
    assert_eq!(count_blocks(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_malformed_structure_materializes_nothing(pool: SqlitePool) {
    // Missing the required `name` field.
    let template = seed_template(&pool, "broken", json!({"type": "week"})).await;

    let err = TemplateRepo::apply(&pool, &template.id, "u1", None)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));

    assert_eq!(count_blocks(&pool).await, 0);
    // The aborted transaction also rolls back the use counter.
    let reloaded = TemplateRepo::find_by_id(&pool, &template.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.use_count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_rejects_invalid_block_type_in_structure(pool: SqlitePool) {
    let template = seed_template(&pool, "bad type", json!({"name": "X", "type": "fortnight"})).await;

    let err = TemplateRepo::apply(&pool, &template.id, "u1", None)
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Core(CoreError::Validation(_)));
    assert_eq!(count_blocks(&pool).await, 0);
}
