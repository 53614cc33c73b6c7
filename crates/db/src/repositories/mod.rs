//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&DbPool` as the first argument. Single-statement operations
//! return `sqlx::Error`; multi-statement operations (wrap, apply) and
//! batched lookups return [`crate::error::DbError`] so domain failures
//! surface alongside store failures.

pub mod block_repo;
pub mod entity_repo;
pub mod item_repo;
pub mod template_repo;
pub mod tier_repo;
pub mod topic_repo;

pub use block_repo::BlockRepo;
pub use entity_repo::EntityRepo;
pub use item_repo::ItemRepo;
pub use template_repo::TemplateRepo;
pub use tier_repo::TierRepo;
pub use topic_repo::TopicRepo;
