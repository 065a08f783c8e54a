//! Server-Sent Events support

use crate::runtime::{ConversationSnapshot, EngineEvent};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Current snapshot first, then every broadcast after it
pub fn sse_stream(
    init: ConversationSnapshot,
    broadcast_rx: tokio::sync::broadcast::Receiver<EngineEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init = futures::stream::once(async move {
        Ok(sse_event("init", json!({ "type": "init", "conversation": to_json(&init) })))
    });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(engine_event_to_axum(event))),
        // Lagged receivers pick up the next full snapshot
        Err(_) => None,
    });

    Sse::new(init.chain(broadcasts)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn engine_event_to_axum(event: EngineEvent) -> Event {
    match event {
        EngineEvent::Snapshot(snapshot) => sse_event(
            "snapshot",
            json!({ "type": "snapshot", "conversation": to_json(&snapshot) }),
        ),
        EngineEvent::Notice { message } => {
            sse_event("notice", json!({ "type": "notice", "message": message }))
        }
    }
}

fn to_json(snapshot: &ConversationSnapshot) -> Value {
    serde_json::to_value(snapshot).unwrap_or(Value::Null)
}

fn sse_event(event_type: &str, data: Value) -> Event {
    Event::default().event(event_type).data(data.to_string())
}
