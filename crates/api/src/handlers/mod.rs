//! HTTP handlers, one module per resource.

pub mod entities;
pub mod journey;
pub mod timeline_blocks;
pub mod timeline_items;
pub mod timeline_templates;
pub mod topics;
