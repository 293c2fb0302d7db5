//! Incremental SSE decoder for the chat-completions stream.
//!
//! Network frames can split lines (and the JSON inside them) at arbitrary
//! byte positions, including inside a multi-byte UTF-8 character, so the
//! decoder buffers raw bytes until a full line is available and only then
//! decodes it. A line that fails to parse is dropped without aborting the
//! stream; only that line's data is lost.

use carebridge_core::StreamDelta;
use serde::Deserialize;
use tracing::trace;

/// Stateful line decoder. One instance per model turn.
///
/// `finish_reason` arrives on its own chunk before the `[DONE]` sentinel, so
/// it is held pending and only materialized as a `Finished` delta by
/// [`SseDecoder::finish`] once the byte source is exhausted or the sentinel
/// has been seen.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    finish_reason: Option<String>,
    saw_tool_fragment: bool,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the `[DONE]` sentinel has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one network frame; returns the deltas decoded from every line
    /// the frame completed. Bytes after the sentinel are ignored.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<StreamDelta> {
        let mut deltas = Vec::new();
        if self.done {
            return deltas;
        }

        self.buffer.extend_from_slice(bytes);

        while let Some(line_end) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=line_end).collect();
            // Only complete lines are decoded, so a character whose bytes
            // straddle two frames stays intact in the buffer until its line ends
            let line = String::from_utf8_lossy(&raw[..line_end]);
            let line = line.trim_end_matches('\r');

            // Skip empty lines and SSE comments
            if line.is_empty() || line.starts_with(':') {
                continue;
            }

            let Some(data) = line.strip_prefix("data: ") else {
                continue;
            };
            let data = data.trim();

            if data == "[DONE]" {
                self.done = true;
                break;
            }
            if data.is_empty() {
                continue;
            }

            self.decode_line(data, &mut deltas);
        }

        deltas
    }

    /// Finalize the turn: the single `Finished` delta.
    ///
    /// When the stream never carried an explicit finish_reason, it is
    /// inferred from whether any tool fragments were seen.
    pub fn finish(self) -> StreamDelta {
        let reason = self.finish_reason.unwrap_or_else(|| {
            if self.saw_tool_fragment {
                "tool_calls".into()
            } else {
                "stop".into()
            }
        });
        StreamDelta::Finished { reason }
    }

    fn decode_line(&mut self, data: &str, deltas: &mut Vec<StreamDelta>) {
        let parsed: StreamResponse = match serde_json::from_str(data) {
            Ok(p) => p,
            Err(e) => {
                trace!(data = %data, error = %e, "Dropping unparseable SSE line");
                return;
            }
        };

        let Some(choice) = parsed.choices.first() else {
            return;
        };

        if let Some(reason) = &choice.finish_reason {
            self.finish_reason = Some(reason.clone());
        }

        if let Some(content) = &choice.delta.content {
            if !content.is_empty() {
                deltas.push(StreamDelta::Text(content.clone()));
            }
        }

        if let Some(tool_calls) = &choice.delta.tool_calls {
            for tc in tool_calls {
                self.saw_tool_fragment = true;
                let (name, arguments) = match &tc.function {
                    Some(f) => (f.name.clone(), f.arguments.clone()),
                    None => (None, None),
                };
                deltas.push(StreamDelta::ToolFragment {
                    index: tc.index,
                    id: tc.id.clone(),
                    name,
                    arguments,
                });
            }
        }
    }
}

// --- Streaming SSE wire types ---

/// A single SSE `data: {...}` chunk from a streaming response.
#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: DeltaBody,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeltaBody {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCallDelta>>,
}

/// A tool call delta, delivered incrementally across chunks.
#[derive(Debug, Deserialize)]
struct ToolCallDelta {
    index: u32,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    function: Option<FunctionDelta>,
}

#[derive(Debug, Deserialize)]
struct FunctionDelta {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
}
