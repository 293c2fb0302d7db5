//! The outward-facing event channel for one conversation run.
//!
//! The sink carries exactly three event kinds to the client:
//! - `chunk`: one text delta, emitted as produced, order-preserving
//! - `done`:  terminal, normal completion, exactly once
//! - `error`: terminal, abnormal completion, at most once
//!
//! `done` and `error` are terminal: implementations must treat any emission
//! after a terminal event as a no-op, so the loop and its caller can both
//! attempt termination without double-emission races.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delivery failure on the client channel (disconnect, backpressure timeout).
#[derive(Debug, Clone, Error)]
#[error("event sink closed: {0}")]
pub struct SinkError(pub String);

/// A wire-level event as written to the client stream.
///
/// The event name travels out-of-band (SSE `event:` field); the payload is
/// the JSON body on the `data:` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SinkEvent {
    /// One text delta: `{"text": "..."}`
    Chunk { text: String },

    /// Abnormal completion: `{"message": "..."}`
    Error { message: String },

    /// Normal completion: `{}`
    Done {},
}

impl SinkEvent {
    /// SSE event name for this event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Chunk { .. } => "chunk",
            Self::Done {} => "done",
            Self::Error { .. } => "error",
        }
    }
}

/// The sink the agent loop writes to. Owned by the caller, written to by
/// exactly one run (no cross-run synchronization needed).
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emit one text delta. The only operation whose delivery failure the
    /// loop needs to observe (a gone client means the run should stop).
    async fn chunk(&self, text: &str) -> Result<(), SinkError>;

    /// Emit the normal-completion terminal event. No-op after terminal.
    async fn done(&self);

    /// Emit the abnormal-completion terminal event. No-op after terminal.
    async fn error(&self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types() {
        assert_eq!(SinkEvent::Chunk { text: "hi".into() }.event_type(), "chunk");
        assert_eq!(SinkEvent::Done {}.event_type(), "done");
        assert_eq!(
            SinkEvent::Error { message: "boom".into() }.event_type(),
            "error"
        );
    }

    #[test]
    fn chunk_payload_shape() {
        let json = serde_json::to_string(&SinkEvent::Chunk { text: "Hello".into() }).unwrap();
        assert_eq!(json, r#"{"text":"Hello"}"#);
    }

    #[test]
    fn done_payload_is_empty_object() {
        let json = serde_json::to_string(&SinkEvent::Done {}).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn error_payload_shape() {
        let json = serde_json::to_string(&SinkEvent::Error {
            message: "upstream failed".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"message":"upstream failed"}"#);
    }
}
