//! The agent orchestration loop.
//!
//! One run serves one frontend request: prepend the system prompt, stream a
//! model turn, and either forward text to the client or execute the
//! requested tools and loop. `end_chat` is intercepted here and never
//! reaches the tool executor's dispatch path.

use std::sync::Arc;

use carebridge_core::{
    Error, EventSink, Message, MessageToolCall, Provider, ProviderRequest, Result, StreamDelta,
    ToolDefinition,
};
use tracing::{debug, info, warn};

use crate::accumulator::ToolCallAccumulator;
use crate::dispatcher::dispatch_tools;
use crate::prompt::SystemPrompt;

const DEFAULT_FAREWELL: &str = "Thank you for using CareBridge. Have a great day!";

/// Orchestrates model turns and tool execution for conversation runs.
///
/// One `AgentLoop` is shared across all requests; all per-run state lives in
/// the `run` call.
pub struct AgentLoop {
    provider: Arc<dyn Provider>,
    executor: Arc<dyn carebridge_core::ToolExecutor>,
    tools: Vec<ToolDefinition>,
    prompt: Arc<SystemPrompt>,
    model: String,
    max_turns: Option<u32>,
    max_parallel_tools: usize,
}

impl AgentLoop {
    pub fn new(
        provider: Arc<dyn Provider>,
        executor: Arc<dyn carebridge_core::ToolExecutor>,
        tools: Vec<ToolDefinition>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            executor,
            tools,
            prompt: Arc::new(SystemPrompt::new()),
            model: model.into(),
            max_turns: None,
            max_parallel_tools: 8,
        }
    }

    /// Cap the number of model turns per run. Unbounded by default.
    pub fn with_max_turns(mut self, max: Option<u32>) -> Self {
        self.max_turns = max;
        self
    }

    /// Cap concurrent tool executions per turn.
    pub fn with_max_parallel_tools(mut self, max: usize) -> Self {
        self.max_parallel_tools = max;
        self
    }

    /// Run one conversation to completion, writing chunks and the terminal
    /// `done` to `sink`.
    ///
    /// An error return means the run ended abnormally with nothing terminal
    /// emitted; the caller owns turning it into the sink's `error` event.
    pub async fn run(
        &self,
        history: Vec<Message>,
        fhir_token: &str,
        sink: &dyn EventSink,
    ) -> Result<()> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(Message::system(self.prompt.current()));
        messages.extend(history);

        let mut turns: u32 = 0;

        loop {
            if let Some(max) = self.max_turns {
                if turns >= max {
                    warn!(turns, "Run exceeded tool-call turn limit");
                    return Err(Error::Internal("tool-call turn limit exceeded".into()));
                }
            }
            turns += 1;

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: messages.clone(),
                tools: self.tools.clone(),
            };

            let mut rx = self.provider.stream(request).await?;

            let mut accumulator = ToolCallAccumulator::new();
            let mut content = String::new();

            while let Some(delta) = rx.recv().await {
                match delta? {
                    StreamDelta::Text(text) => {
                        content.push_str(&text);
                        sink.chunk(&text).await?;
                    }
                    StreamDelta::ToolFragment {
                        index,
                        id,
                        name,
                        arguments,
                    } => {
                        accumulator.apply(index, id.as_deref(), name.as_deref(), arguments.as_deref());
                    }
                    StreamDelta::Finished { reason } => {
                        debug!(turn = turns, %reason, "Model turn finished");
                    }
                }
            }

            let tool_calls = accumulator.finish();

            if tool_calls.is_empty() {
                // Final text answer; every chunk already went out
                sink.done().await;
                info!(turns, "Run completed");
                return Ok(());
            }

            messages.push(Message::assistant_with_tools(
                if content.is_empty() { None } else { Some(content) },
                tool_calls.clone(),
            ));

            if let Some(end_call) = tool_calls.iter().find(|tc| tc.name == "end_chat") {
                let farewell = farewell_message(end_call);
                sink.chunk(&farewell).await?;
                sink.done().await;
                info!(turns, "Run ended by end_chat");
                return Ok(());
            }

            let outcomes = dispatch_tools(
                Arc::clone(&self.executor),
                &tool_calls,
                fhir_token,
                self.max_parallel_tools,
            )
            .await;

            for outcome in outcomes {
                messages.push(Message::tool_result(outcome.tool_call_id, outcome.content));
            }
        }
    }
}

fn farewell_message(call: &MessageToolCall) -> String {
    serde_json::from_str::<serde_json::Value>(&call.arguments)
        .ok()
        .and_then(|args| {
            args.get("farewell_message")
                .and_then(|v| v.as_str())
                .map(str::to_owned)
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_FAREWELL.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn farewell_prefers_model_text() {
        let call = MessageToolCall {
            id: "c1".into(),
            name: "end_chat".into(),
            arguments: json!({"farewell_message": "Goodbye, Dr. Lee."}).to_string(),
        };
        assert_eq!(farewell_message(&call), "Goodbye, Dr. Lee.");
    }

    #[test]
    fn farewell_falls_back_on_missing_or_malformed_args() {
        let missing = MessageToolCall {
            id: "c1".into(),
            name: "end_chat".into(),
            arguments: "{}".into(),
        };
        assert_eq!(farewell_message(&missing), DEFAULT_FAREWELL);

        let malformed = MessageToolCall {
            id: "c2".into(),
            name: "end_chat".into(),
            arguments: "{broken".into(),
        };
        assert_eq!(farewell_message(&malformed), DEFAULT_FAREWELL);
    }
}
