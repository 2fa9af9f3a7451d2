use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::SharedState;

/// GET /api/results: full session history, most recent first.
pub async fn result_history(
    State(state): State<SharedState>,
) -> Json<serde_json::Value> {
    let results = state.results.all().await;
    let total = results.len();

    Json(serde_json::json!({
        "results": results,
        "total": total,
    }))
}

/// GET /api/results/stream: SSE stream of results as they are recorded.
pub async fn result_stream(
    State(state): State<SharedState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.results.subscribe());

    let event_stream = stream.filter_map(|result| match result {
        Ok(entry) => {
            let data = serde_json::to_string(&entry).unwrap_or_default();
            Some(Ok(Event::default().event("result").data(data)))
        }
        Err(_) => None, // lagged
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
