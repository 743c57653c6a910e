use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted after successful writes, consumed by SSE listeners.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StudioEvent {
    Welcome,
    ContentUpdated(ContentUpdatedEvent),
    SectionsReordered(SectionsReorderedEvent),
    /// Sent to listeners that lagged behind the bus and lost events; the
    /// client should re-fetch instead of trusting its local view.
    Reconnect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentUpdatedEvent {
    pub section_id: Uuid,
    pub section_key: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionsReorderedEvent {
    pub count: usize,
}
