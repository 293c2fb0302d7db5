//! # CareBridge Agent
//!
//! The orchestration loop at the heart of the backend: stream a model turn,
//! merge tool-call fragments, run the requested tools concurrently, extend
//! the conversation with their results, and go again until the model
//! produces a plain text answer (or ends the chat).

pub mod accumulator;
pub mod dispatcher;
pub mod knowledge;
pub mod loop_runner;
pub mod prompt;

pub use accumulator::ToolCallAccumulator;
pub use dispatcher::{dispatch_tools, ToolOutcome};
pub use loop_runner::AgentLoop;
pub use prompt::SystemPrompt;
