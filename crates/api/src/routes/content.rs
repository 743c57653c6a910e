use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use content_studio_core::envelope::ApiEnvelope;
use content_studio_core::events::types::{ContentUpdatedEvent, StudioEvent};
use content_studio_core::section::model::{ContentSection, UpdateContentRequest};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/content", get(list_content).put(update_content))
}

/// List every section with its content and optional defaults.
async fn list_content(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiEnvelope<Vec<ContentSection>>>> {
    let sections = store::list_sections(state.pool()).await?;
    Ok(Json(ApiEnvelope::ok(sections)))
}

/// Replace a section's content wholesale. The editor always sends the full
/// draft; `defaults` is never written here.
async fn update_content(
    State(state): State<AppState>,
    Json(request): Json<UpdateContentRequest>,
) -> ApiResult<Json<ApiEnvelope<()>>> {
    let updated_at =
        store::replace_section_content(state.pool(), request.id, &request.section, &request.content)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "no section '{}' with id {}",
                    request.section, request.id
                ))
            })?;

    tracing::info!(section = %request.section, "content replaced");
    state
        .event_bus()
        .publish(StudioEvent::ContentUpdated(ContentUpdatedEvent {
            section_id: request.id,
            section_key: request.section,
            updated_at,
        }));

    Ok(Json(ApiEnvelope::ok_empty()))
}
