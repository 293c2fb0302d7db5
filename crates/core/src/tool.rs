//! The capability that resolves one tool call.
//!
//! The executor owns everything behind a tool name: query construction, the
//! outbound HTTP call, and response caching. Its contract is deliberately
//! infallible: whatever goes wrong is encoded into the returned string so one
//! bad tool call never aborts the turn or its sibling calls.

use async_trait::async_trait;

/// Resolves one tool call into a result string.
///
/// Implementations must never fail. On internal failure they return a string
/// encoding `{"error": "<message>"}`; on an unknown tool name they return
/// `{"error": "Unknown tool: <name>"}`.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute the named tool with parsed arguments and a bearer token for
    /// the backing resource.
    async fn execute(&self, name: &str, arguments: serde_json::Value, token: &str) -> String;
}
