//! Concurrent tool dispatch.
//!
//! All tool calls from one model turn run concurrently, bounded by a
//! configurable limit, and the outcomes come back in the input order so
//! history stays aligned with the order the model requested the calls.
//! Dropping the dispatch future cancels the in-flight tool executions.

use carebridge_core::{MessageToolCall, ToolExecutor};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::debug;

/// The result of one tool execution, ready to append to history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub tool_call_id: String,
    pub content: String,
}

/// Execute every call concurrently (at most `max_parallel` in flight).
///
/// Arguments that fail to parse as JSON are replaced with an empty object;
/// the executor decides what that means for the tool in question.
pub async fn dispatch_tools(
    executor: Arc<dyn ToolExecutor>,
    calls: &[MessageToolCall],
    token: &str,
    max_parallel: usize,
) -> Vec<ToolOutcome> {
    debug!(count = calls.len(), max_parallel, "Dispatching tool calls");

    stream::iter(calls.iter().cloned())
        .map(|call| {
            let executor = Arc::clone(&executor);
            let token = token.to_string();
            async move {
                let args: serde_json::Value = serde_json::from_str(&call.arguments)
                    .unwrap_or_else(|_| serde_json::json!({}));
                let content = executor.execute(&call.name, args, &token).await;
                ToolOutcome {
                    tool_call_id: call.id,
                    content,
                }
            }
        })
        .buffered(max_parallel.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Records peak concurrency and echoes the tool name back.
    struct TrackingExecutor {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl TrackingExecutor {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ToolExecutor for TrackingExecutor {
        async fn execute(&self, name: &str, arguments: serde_json::Value, _token: &str) -> String {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            format!("{name}:{arguments}")
        }
    }

    fn call(id: &str, name: &str, arguments: &str) -> MessageToolCall {
        MessageToolCall {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    #[tokio::test]
    async fn outcomes_preserve_input_order() {
        let executor = Arc::new(TrackingExecutor::new());
        let calls = vec![
            call("c1", "search_fhir_patient", r#"{"GIVEN":"a"}"#),
            call("c2", "search_patient_condition", r#"{"SUBJECT":"7"}"#),
            call("c3", "search_patient_observations", r#"{"CODE":"718-7"}"#),
        ];

        let outcomes = dispatch_tools(executor, &calls, "tok", 8).await;
        let ids: Vec<&str> = outcomes.iter().map(|o| o.tool_call_id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
    }

    #[tokio::test]
    async fn concurrency_is_bounded() {
        let executor = Arc::new(TrackingExecutor::new());
        let calls: Vec<MessageToolCall> = (0..20)
            .map(|i| call(&format!("c{i}"), "search_patient_observations", "{}"))
            .collect();

        let outcomes = dispatch_tools(Arc::clone(&executor) as Arc<dyn ToolExecutor>, &calls, "tok", 8).await;
        assert_eq!(outcomes.len(), 20);
        assert!(executor.peak.load(Ordering::SeqCst) <= 8);
    }

    #[tokio::test]
    async fn calls_actually_overlap() {
        let executor = Arc::new(TrackingExecutor::new());
        let calls: Vec<MessageToolCall> =
            (0..4).map(|i| call(&format!("c{i}"), "t", "{}")).collect();

        dispatch_tools(Arc::clone(&executor) as Arc<dyn ToolExecutor>, &calls, "tok", 8).await;
        assert!(executor.peak.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn malformed_arguments_become_empty_object() {
        let executor = Arc::new(TrackingExecutor::new());
        let calls = vec![call("c1", "search_fhir_patient", "{not valid json")];

        let outcomes = dispatch_tools(executor, &calls, "tok", 8).await;
        assert_eq!(outcomes[0].content, "search_fhir_patient:{}");
    }

    #[tokio::test]
    async fn zero_bound_is_clamped_to_one() {
        let executor = Arc::new(TrackingExecutor::new());
        let calls = vec![call("c1", "t", "{}")];
        let outcomes = dispatch_tools(executor, &calls, "tok", 0).await;
        assert_eq!(outcomes.len(), 1);
    }
}
