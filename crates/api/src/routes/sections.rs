use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use content_studio_core::envelope::ApiEnvelope;
use content_studio_core::events::types::{SectionsReorderedEvent, StudioEvent};
use content_studio_core::section::model::{NewSectionEntry, ReorderRequest, SectionEntry};
use content_studio_core::section::validate;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store;

/// Homepage section registry. All verbs live on one path, id via body or
/// query, matching the admin UI's contract.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/sections",
            get(list_entries)
                .post(create_entry)
                .put(update_entry)
                .delete(delete_entry),
        )
        .route("/api/sections/reorder", post(reorder_entries))
}

async fn list_entries(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiEnvelope<Vec<SectionEntry>>>> {
    let entries = store::list_registry(state.pool()).await?;
    Ok(Json(ApiEnvelope::ok(entries)))
}

async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<NewSectionEntry>,
) -> ApiResult<Json<ApiEnvelope<SectionEntry>>> {
    validate::validate_new_entry(&request)?;
    let entry = store::create_registry_entry(state.pool(), &request).await?;
    tracing::info!(key = %entry.key, "section registered");
    Ok(Json(ApiEnvelope::ok(entry)))
}

async fn update_entry(
    State(state): State<AppState>,
    Json(entry): Json<SectionEntry>,
) -> ApiResult<Json<ApiEnvelope<()>>> {
    validate::validate_section_key(&entry.key)?;
    if !store::update_registry_entry(state.pool(), &entry).await? {
        return Err(ApiError::NotFound(format!("no section with id {}", entry.id)));
    }
    Ok(Json(ApiEnvelope::ok_empty()))
}

#[derive(Debug, Deserialize)]
struct DeleteParams {
    id: Uuid,
}

async fn delete_entry(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<ApiEnvelope<()>>> {
    if !store::delete_registry_entry(state.pool(), params.id).await? {
        return Err(ApiError::NotFound(format!("no section with id {}", params.id)));
    }
    Ok(Json(ApiEnvelope::ok_empty()))
}

/// Full position renumbering of the registry, applied transactionally.
async fn reorder_entries(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> ApiResult<Json<ApiEnvelope<()>>> {
    validate::validate_reorder(&request)?;
    store::reorder_registry(state.pool(), &request).await?;

    state
        .event_bus()
        .publish(StudioEvent::SectionsReordered(SectionsReorderedEvent {
            count: request.new_order.len(),
        }));

    Ok(Json(ApiEnvelope::ok_empty()))
}
