pub mod content;
pub mod health;
pub mod listen;
pub mod sections;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(content::routes())
        .merge(sections::routes())
        .merge(listen::routes())
        .merge(upload::routes(state.config()))
        .with_state(state)
}
