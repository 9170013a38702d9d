use crate::constants::SSE_KEEP_ALIVE_SECS;
use crate::daemon::state::DaemonState;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::{self, Stream, StreamExt};
use serde::Serialize;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tracing::warn;

pub const EVENTS_ENDPOINT: &str = "/api/events";

const HEARTBEAT: &str = r#"{"type":"heartbeat","data":{}}"#;

/// Server-sent events: one `initial_state` with the visible services, then
/// every bus event as `{"type": ..., "data": ...}`.
pub async fn events(
    State(state): State<DaemonState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // subscribe first so nothing published while the snapshot is read is lost
    let receiver = state.bus().subscribe();
    let services = state.merged_services(false).await;
    let initial = json_event(&json!({ "type": "initial_state", "data": services }));

    let updates = BroadcastStream::new(receiver).filter_map(|message| async move {
        match message {
            Ok(event) => json_event(&event),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!("SSE subscriber fell behind, {} events dropped", skipped);
                None
            }
        }
    });

    let stream = stream::iter(initial).chain(updates).map(Ok::<_, Infallible>);

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(SSE_KEEP_ALIVE_SECS))
            .event(Event::default().data(HEARTBEAT)),
    )
}

fn json_event<T: Serialize>(payload: &T) -> Option<Event> {
    match Event::default().json_data(payload) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!("Failed to encode SSE payload: {}", e);
            None
        }
    }
}
