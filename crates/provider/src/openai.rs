//! OpenAI chat-completions provider.
//!
//! One `stream` call per model turn. The call resolves once response headers
//! are in: a non-success status becomes a `ProviderError` before any delta
//! exists, and the error event the client eventually sees carries the
//! upstream `error.message` text when the body has one.

use async_trait::async_trait;
use carebridge_config::AppConfig;
use carebridge_core::{
    Message, MessageToolCall, Provider, ProviderError, ProviderRequest, Role, StreamDelta,
    ToolDefinition,
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::sse::SseDecoder;

/// Streaming client for the OpenAI chat-completions endpoint.
pub struct OpenAiProvider {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a provider with explicit endpoint, key, and HTTP timeouts.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(read_timeout)
            .pool_idle_timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create a provider from loaded configuration.
    ///
    /// Errors when no API key is configured; everything else has defaults.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let api_key = config.openai.api_key.clone().ok_or_else(|| {
            ProviderError::NotConfigured(
                "No OpenAI API key set (CAREBRIDGE_OPENAI_API_KEY or config file)".into(),
            )
        })?;

        Ok(Self::new(
            config.openai.api_url.clone(),
            api_key,
            Duration::from_secs(config.http.connect_timeout_secs),
            Duration::from_secs(config.http.read_timeout_secs),
        ))
    }

    /// Convert our Message types to OpenAI API format.
    fn to_api_messages(messages: &[Message]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    Role::User => "user".into(),
                    Role::Assistant => "assistant".into(),
                    Role::System => "system".into(),
                    Role::Tool => "tool".into(),
                },
                content: m.content.clone(),
                tool_calls: if m.tool_calls.is_empty() {
                    None
                } else {
                    Some(m.tool_calls.iter().map(ApiToolCall::from).collect())
                },
                tool_call_id: m.tool_call_id.clone(),
            })
            .collect()
    }

    /// Convert tool definitions to OpenAI API format.
    fn to_api_tools(tools: &[ToolDefinition]) -> Vec<ApiToolDefinition> {
        tools
            .iter()
            .map(|t| ApiToolDefinition {
                r#type: "function".into(),
                function: ApiToolFunction {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: t.parameters.clone(),
                },
            })
            .collect()
    }

    /// Pull a human-readable message out of an error response body.
    ///
    /// The endpoint usually answers `{"error": {"message": "..."}}`; anything
    /// else falls back to a generic status line.
    fn error_message(status: u16, body: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .map(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("OpenAI API error {status}"))
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn stream(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<StreamDelta, ProviderError>>,
        ProviderError,
    > {
        let url = format!("{}/chat/completions", self.api_url);

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": Self::to_api_messages(&request.messages),
            "stream": true,
        });

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(Self::to_api_tools(&request.tools));
            body["tool_choice"] = serde_json::json!("auto");
        }

        debug!(model = %request.model, messages = request.messages.len(), "Sending streaming request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if !(200..300).contains(&status) {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "OpenAI returned error status");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: Self::error_message(status, &error_body),
            });
        }

        let (tx, rx) = tokio::sync::mpsc::channel(64);

        // Spawn task to read the SSE byte stream and forward decoded deltas
        tokio::spawn(async move {
            let mut byte_stream = response.bytes_stream();
            let mut decoder = SseDecoder::new();

            while let Some(chunk_result) = byte_stream.next().await {
                let bytes = match chunk_result {
                    Ok(b) => b,
                    Err(e) => {
                        let _ = tx
                            .send(Err(ProviderError::StreamInterrupted(e.to_string())))
                            .await;
                        return;
                    }
                };

                for delta in decoder.feed(&bytes) {
                    if tx.send(Ok(delta)).await.is_err() {
                        // Receiver dropped: run cancelled, stop reading
                        return;
                    }
                }

                if decoder.is_done() {
                    break;
                }
            }

            let _ = tx.send(Ok(decoder.finish())).await;
        });

        Ok(rx)
    }
}

// --- OpenAI API wire types (requests) ---

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    // Always serialized: an assistant tool-call message carries null content
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ApiToolCall {
    id: String,
    r#type: String,
    function: ApiFunction,
}

impl From<&MessageToolCall> for ApiToolCall {
    fn from(tc: &MessageToolCall) -> Self {
        Self {
            id: tc.id.clone(),
            r#type: "function".into(),
            function: ApiFunction {
                name: tc.name.clone(),
                arguments: tc.arguments.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize)]
struct ApiToolDefinition {
    r#type: String,
    function: ApiToolFunction,
}

#[derive(Debug, Serialize)]
struct ApiToolFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

// --- OpenAI API wire types (error responses) ---

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenAiProvider {
        OpenAiProvider::new(
            server.uri(),
            "test-key",
            Duration::from_secs(5),
            Duration::from_secs(5),
        )
    }

    fn request_with(messages: Vec<Message>) -> ProviderRequest {
        ProviderRequest {
            model: "gpt-4o-mini".into(),
            messages,
            tools: vec![],
        }
    }

    async fn collect(
        mut rx: tokio::sync::mpsc::Receiver<Result<StreamDelta, ProviderError>>,
    ) -> Vec<Result<StreamDelta, ProviderError>> {
        let mut out = Vec::new();
        while let Some(item) = rx.recv().await {
            out.push(item);
        }
        out
    }

    #[tokio::test]
    async fn streams_text_deltas_and_finishes() {
        let server = MockServer::start().await;
        let sse = concat!(
            "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"},\"finish_reason\":null}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"lo\"},\"finish_reason\":null}]}\n\n",
            "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
            "data: [DONE]\n\n",
        );

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({"stream": true})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/event-stream")
                    .set_body_raw(sse, "text/event-stream"),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let rx = provider
            .stream(request_with(vec![Message::user("hi")]))
            .await
            .unwrap();

        let deltas = collect(rx).await;
        assert_eq!(
            deltas
                .into_iter()
                .map(|d| d.unwrap())
                .collect::<Vec<_>>(),
            vec![
                StreamDelta::Text("Hel".into()),
                StreamDelta::Text("lo".into()),
                StreamDelta::Finished { reason: "stop".into() },
            ]
        );
    }

    #[tokio::test]
    async fn tool_fragments_are_forwarded_in_order() {
        let server = MockServer::start().await;
        let sse = concat!(
            "data: {\"choices\":[{\"delta\":{\"tool_calls\":[{\"index\":0,\"id\":\"call_1\",\"function\":{\"name\":\"search_fhir_patient\",\"arguments\":\"\"}}]},\"finish_reason\":null}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"tool_calls\":[{\"index\":0,\"function\":{\"arguments\":\"{}\"}}]},\"finish_reason\":null}]}\n\n",
            "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"tool_calls\"}]}\n\n",
            "data: [DONE]\n\n",
        );

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/event-stream")
                    .set_body_raw(sse, "text/event-stream"),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let rx = provider
            .stream(request_with(vec![Message::user("find patient")]))
            .await
            .unwrap();

        let deltas: Vec<StreamDelta> = collect(rx).await.into_iter().map(|d| d.unwrap()).collect();
        assert_eq!(deltas.len(), 3);
        assert!(matches!(
            &deltas[0],
            StreamDelta::ToolFragment { index: 0, id: Some(id), .. } if id == "call_1"
        ));
        assert!(matches!(
            &deltas[1],
            StreamDelta::ToolFragment { index: 0, id: None, arguments: Some(a), .. } if a == "{}"
        ));
        assert_eq!(
            deltas[2],
            StreamDelta::Finished { reason: "tool_calls".into() }
        );
    }

    #[tokio::test]
    async fn error_status_surfaces_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": { "message": "Rate limit reached for gpt-4o-mini" }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .stream(request_with(vec![Message::user("hi")]))
            .await
            .unwrap_err();

        match err {
            ProviderError::ApiError { status_code, message } => {
                assert_eq!(status_code, 429);
                assert_eq!(message, "Rate limit reached for gpt-4o-mini");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_status_without_parseable_body_gets_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .stream(request_with(vec![Message::user("hi")]))
            .await
            .unwrap_err();

        match err {
            ProviderError::ApiError { status_code, message } => {
                assert_eq!(status_code, 500);
                assert_eq!(message, "OpenAI API error 500");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_done_sentinel_still_finishes() {
        let server = MockServer::start().await;
        // Stream ends without [DONE]: the turn is finalized from stream state
        let sse =
            "data: {\"choices\":[{\"delta\":{\"content\":\"partial\"},\"finish_reason\":null}]}\n\n";

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/event-stream")
                    .set_body_raw(sse, "text/event-stream"),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let rx = provider
            .stream(request_with(vec![Message::user("hi")]))
            .await
            .unwrap();

        let deltas: Vec<StreamDelta> = collect(rx).await.into_iter().map(|d| d.unwrap()).collect();
        assert_eq!(
            deltas,
            vec![
                StreamDelta::Text("partial".into()),
                StreamDelta::Finished { reason: "stop".into() },
            ]
        );
    }

    #[test]
    fn assistant_tool_call_message_serializes_null_content() {
        let msg = Message::assistant_with_tools(
            None,
            vec![MessageToolCall {
                id: "call_1".into(),
                name: "search_fhir_patient".into(),
                arguments: "{}".into(),
            }],
        );
        let api = OpenAiProvider::to_api_messages(&[msg]);
        let json = serde_json::to_value(&api[0]).unwrap();
        assert!(json["content"].is_null());
        assert_eq!(json["tool_calls"][0]["type"], "function");
        assert_eq!(json["tool_calls"][0]["function"]["name"], "search_fhir_patient");
    }
}
