use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use content_studio_core::events::types::StudioEvent;

use crate::state::AppState;

/// Server-sent event stream of studio events.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/listen", get(listen))
}

/// Sends `Welcome`, then forwards bus events. A listener that lags behind
/// the bus gets `Reconnect` and should re-fetch rather than trust its local
/// view.
async fn listen(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.event_bus().subscribe();
    tracing::debug!(listeners = state.event_bus().subscriber_count(), "listener connected");

    let welcome = stream::iter(vec![sse_event(&StudioEvent::Welcome)]);
    let events = stream::unfold(rx, |mut rx| async move {
        match rx.recv().await {
            Ok(event) => Some((sse_event(&event), rx)),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "listener lagged, asking it to reconnect");
                Some((sse_event(&StudioEvent::Reconnect), rx))
            }
            Err(RecvError::Closed) => None,
        }
    });

    Sse::new(welcome.chain(events)).keep_alive(KeepAlive::default())
}

fn sse_event(event: &StudioEvent) -> Result<Event, Infallible> {
    // StudioEvent serialization cannot fail; fall back to an empty object
    // rather than poisoning the stream.
    let data = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    Ok(Event::default().data(data))
}
