//! The abstraction over the LLM completion endpoint.
//!
//! A Provider knows how to send a conversation to the model and stream the
//! response back as a sequence of structured deltas. The agent loop consumes
//! that sequence without knowing which transport produced it, which is also
//! what makes the loop testable with a scripted provider.

use crate::error::ProviderError;
use crate::message::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One model-turn request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "gpt-4o-mini")
    pub model: String,

    /// The full conversation history for this turn
    pub messages: Vec<Message>,

    /// Tool schemas the model may call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

/// A tool definition sent to the LLM so it knows what tools it can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// One structured delta decoded from the model's event stream.
///
/// Deltas are ephemeral: they exist only while one turn is being consumed.
/// Malformed stream lines never surface here; the decoder drops them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamDelta {
    /// A text fragment. Forwarded to the client sink as soon as it arrives.
    Text(String),

    /// A fragment of one tool call, keyed by its position index.
    ///
    /// Any subset of the parts may be present; fields of the same index are
    /// concatenated across fragments in arrival order.
    ToolFragment {
        index: u32,
        id: Option<String>,
        name: Option<String>,
        arguments: Option<String>,
    },

    /// The turn finished. Emitted exactly once, after the byte source is
    /// exhausted or the `[DONE]` sentinel was seen.
    Finished { reason: String },
}

/// The core Provider trait.
///
/// `stream` resolves once response headers are in: a non-success status is an
/// error here, before any delta is produced. The returned channel then yields
/// deltas as network frames arrive; it closes after `Finished` (or an error).
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a request and stream back structured deltas.
    async fn stream(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<StreamDelta, ProviderError>>,
        ProviderError,
    >;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_definition_serialization() {
        let tool = ToolDefinition {
            name: "search_fhir_patient".into(),
            description: "Search for patients".into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "GIVEN": { "type": "string", "description": "Patient first/given name" }
                }
            }),
        };
        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains("search_fhir_patient"));
        assert!(json.contains("GIVEN"));
    }

    #[test]
    fn request_omits_empty_tools() {
        let req = ProviderRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![],
            tools: vec![],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("tools"));
    }
}
