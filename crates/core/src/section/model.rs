use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A named, independently editable region of the site (hero, footer, ...).
///
/// `content` is free-form JSON, section-specific and untyped at this level;
/// it may carry a parallel `styles` map handled by the editor crate.
/// `defaults` is the shipped baseline used for diffing and reset, never
/// written by the editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    pub id: Uuid,
    /// Section key, e.g. `"hero"`.
    pub section: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Value>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `PUT /api/content`: a section's content replaced wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentRequest {
    pub id: Uuid,
    pub section: String,
    pub content: Value,
}

/// One entry of the homepage section registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionEntry {
    pub id: Uuid,
    pub key: String,
    pub name: String,
    pub icon: String,
    pub enabled: bool,
    pub position: i32,
}

/// Body of `POST /api/sections`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSectionEntry {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Body of `POST /api/sections/reorder`: a full renumbering of the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub new_order: Vec<ReorderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderItem {
    pub id: Uuid,
    pub position: i32,
}

/// Rewrite every entry's `position` to its index in the slice and produce
/// the reorder payload. The wire contract is always the whole list, not a
/// delta.
pub fn renumber_positions(entries: &mut [SectionEntry]) -> ReorderRequest {
    let mut new_order = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.position = index as i32;
        new_order.push(ReorderItem {
            id: entry.id,
            position: entry.position,
        });
    }
    ReorderRequest { new_order }
}
