//! Shared response payload types for API handlers.
//!
//! Mutating timeline endpoints answer with a human-readable `message` plus
//! the id(s) the caller needs next; use these structs instead of ad-hoc
//! `serde_json::json!` so the wire shapes stay consistent.

use serde::Serialize;

use journey_db::models::timeline_block::TimeBlock;

/// `{ "message": ... }` -- acknowledgment for updates and deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `{ "id": ..., "message": ... }` -- acknowledgment for creates.
#[derive(Debug, Serialize)]
pub struct IdMessageResponse {
    pub id: String,
    pub message: &'static str,
}

/// Response for the wrap operation: the id of the synthesized parent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapResponse {
    pub parent_id: String,
    pub message: &'static str,
}

/// Response for template application: the freshly created blocks, so the
/// caller can render without a follow-up read.
#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub message: &'static str,
    pub blocks: Vec<TimeBlock>,
}
