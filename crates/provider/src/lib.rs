//! OpenAI chat-completions client for CareBridge.
//!
//! The model endpoint speaks SSE: `data: {json}` lines terminated by a
//! `data: [DONE]` sentinel. The [`sse::SseDecoder`] turns that byte stream
//! into structured [`carebridge_core::StreamDelta`]s; [`OpenAiProvider`]
//! wires it to the HTTP transport and implements the core `Provider` trait.

pub mod openai;
pub mod sse;

pub use openai::OpenAiProvider;
pub use sse::SseDecoder;
