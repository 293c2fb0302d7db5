//! Message domain types.
//!
//! These are the value objects that flow through one conversation run:
//! the frontend sends a message history, the agent loop extends it turn by
//! turn, and the provider serializes it onto the wire. History is owned by
//! exactly one run and is append-only; messages are never mutated once pushed.

use serde::{Deserialize, Serialize};

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user (clinician)
    User,
    /// The AI assistant
    Assistant,
    /// System instructions (prompt + knowledge base)
    System,
    /// Tool execution result
    Tool,
}

/// A single message in a conversation.
///
/// `content` is optional because an assistant turn that only requests tool
/// calls carries `null` content on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message
    pub role: Role,

    /// The text content, if any
    #[serde(default)]
    pub content: Option<String>,

    /// Tool calls requested by the assistant (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<MessageToolCall>,

    /// If this is a tool result, which tool call it responds to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Create an assistant message carrying accumulated tool calls.
    ///
    /// `content` is whatever text the model produced alongside the calls,
    /// usually nothing.
    pub fn assistant_with_tools(content: Option<String>, tool_calls: Vec<MessageToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content,
            tool_calls,
            tool_call_id: None,
        }
    }

    /// Create a plain assistant text message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::assistant_with_tools(Some(content.into()), Vec::new())
    }

    /// Create a tool result message.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

/// A completed tool call embedded in an assistant message.
///
/// Produced either whole by the model or by merging streamed fragments.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageToolCall {
    /// Unique ID for this tool call (matches the model's tool_call id)
    pub id: String,

    /// Name of the tool to invoke
    pub name: String,

    /// Arguments as a JSON string
    pub arguments: String,
}
