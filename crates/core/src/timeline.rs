//! Timeline domain rules: block/item type vocabularies, the typed metadata
//! mapping, and the template blueprint parsed before materialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Type vocabularies
   -------------------------------------------------------------------------- */

/// All valid time block types. `custom` carries a free-text label in the
/// block's `customType` field.
pub const VALID_BLOCK_TYPES: &[&str] = &[
    "day", "week", "sprint", "phase", "month", "quarter", "year", "decade", "era", "custom",
];

/// All valid timeline item types.
pub const VALID_ITEM_TYPES: &[&str] = &["task", "deadline", "milestone", "note"];

/// Maximum length for block names, item titles, and template names.
pub const MAX_NAME_LEN: usize = 200;

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Validate that `block_type` is one of the allowed values.
pub fn validate_block_type(block_type: &str) -> Result<(), CoreError> {
    if VALID_BLOCK_TYPES.contains(&block_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid block type '{block_type}'. Must be one of: {}",
            VALID_BLOCK_TYPES.join(", ")
        )))
    }
}

/// Validate that `item_type` is one of the allowed values.
pub fn validate_item_type(item_type: &str) -> Result<(), CoreError> {
    if VALID_ITEM_TYPES.contains(&item_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid item type '{item_type}'. Must be one of: {}",
            VALID_ITEM_TYPES.join(", ")
        )))
    }
}

/// Validate a user-facing name (block name, item title, template name).
pub fn validate_name(field: &'static str, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
   Metadata
   -------------------------------------------------------------------------- */

/// A single metadata value. The key set is open but values are restricted to
/// a small closed set of shapes rather than arbitrary JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<String>),
}

/// Free-form but typed key/value metadata attached to a block.
pub type Metadata = BTreeMap<String, MetadataValue>;

/* --------------------------------------------------------------------------
   Template blueprints
   -------------------------------------------------------------------------- */

/// One block node in a template structure. A blueprint, not a reference to
/// live rows: ids are assigned only when the template is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBlockSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub custom_type: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub items: Vec<TemplateItemSpec>,
    #[serde(default)]
    pub children: Vec<TemplateBlockSpec>,
}

/// One item node in a template structure. Items are always leaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateItemSpec {
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub related_topics: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub reminder: Option<serde_json::Value>,
}

/// Parse a stored template structure into the typed blueprint.
///
/// Structures are persisted verbatim at creation time, so a malformed one is
/// only discovered here, when the template is applied.
pub fn parse_structure(structure: &serde_json::Value) -> Result<TemplateBlockSpec, CoreError> {
    let spec: TemplateBlockSpec = serde_json::from_value(structure.clone())
        .map_err(|e| CoreError::Validation(format!("Malformed template structure: {e}")))?;
    validate_spec(&spec)?;
    Ok(spec)
}

fn validate_spec(spec: &TemplateBlockSpec) -> Result<(), CoreError> {
    validate_name("name", &spec.name)?;
    validate_block_type(&spec.block_type)?;
    for item in &spec.items {
        validate_name("title", &item.title)?;
        validate_item_type(&item.item_type)?;
    }
    for child in &spec.children {
        validate_spec(child)?;
    }
    Ok(())
}
