//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Timeline models serialize with camelCase field names on the wire;
//! curriculum models are returned as raw snake_case rows.
//!
//! Patch DTOs distinguish "field absent" from "field null": nullable
//! columns use `Option<Option<T>>` via [`patch_field`], so `parentId: null`
//! clears the column while omitting it leaves it untouched.

use serde::{Deserialize, Deserializer};

pub mod entity;
pub mod tier;
pub mod timeline_block;
pub mod timeline_item;
pub mod timeline_template;
pub mod topic;

/// Deserializer for patch fields on nullable columns. Combined with
/// `#[serde(default)]`, an absent field stays `None` and an explicit
/// `null` becomes `Some(None)`.
pub fn patch_field<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
