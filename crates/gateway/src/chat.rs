//! `POST /api/chat`: run one conversation, stream the result as SSE.
//!
//! Event format on the wire:
//!   event: chunk   data: {"text":"..."}
//!   event: done    data: {}
//!   event: error   data: {"message":"..."}
//!
//! The run executes in a spawned task under the configured timeout; the
//! handler returns the SSE response as soon as the channel is wired up.

use axum::extract::State;
use axum::response::sse::{Event as SseEvent, Sse};
use axum::response::Json;
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{info, warn};

use carebridge_core::{EventSink, Message};

use crate::sink::SseSink;
use crate::SharedState;

/// The frontend's request body. `fhirToken` is the bearer token the
/// frontend obtained at login; history is the full conversation so far.
#[derive(Debug, serde::Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(rename = "fhirToken", default)]
    pub fhir_token: String,
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Sse<impl futures::Stream<Item = Result<SseEvent, Infallible>>> {
    info!(messages = payload.messages.len(), "Chat run requested");

    let (tx, rx) = tokio::sync::mpsc::channel(64);
    let sink = SseSink::new(tx);
    let agent = Arc::clone(&state.agent);
    let run_timeout = state.run_timeout;

    tokio::spawn(async move {
        let run = agent.run(payload.messages, &payload.fhir_token, &sink);
        match tokio::time::timeout(run_timeout, run).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(error = %e, "Chat run failed");
                sink.error(&e.to_string()).await;
            }
            Err(_) => {
                // Dropping the run future cancels the provider stream and
                // any in-flight tool executions
                warn!(timeout_secs = run_timeout.as_secs(), "Chat run timed out");
                sink.error("The request timed out. Please try again.").await;
            }
        }
    });

    let stream = ReceiverStream::new(rx).map(|event| {
        let name = event.event_type();
        let data = serde_json::to_string(&event).unwrap_or_default();
        Ok(SseEvent::default().event(name).data(data))
    });

    Sse::new(stream)
}
