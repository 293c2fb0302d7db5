//! Merges streamed tool-call fragments into completed tool calls.
//!
//! The model emits each tool call in pieces, keyed by a position index. Any
//! subset of `id`, `name`, and `arguments` may appear in a fragment, and the
//! pieces of a field are concatenated in arrival order. A fragment for a new
//! index does not close out earlier indexes; nothing is final until the turn
//! ends and [`ToolCallAccumulator::finish`] is called.

use carebridge_core::MessageToolCall;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Builder {
    id: String,
    name: String,
    arguments: String,
}

/// Per-turn accumulator. Consumed by `finish`; a new turn gets a new one.
#[derive(Debug, Default)]
pub struct ToolCallAccumulator {
    builders: BTreeMap<u32, Builder>,
}

impl ToolCallAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one fragment. Absent fields leave the builder untouched.
    pub fn apply(
        &mut self,
        index: u32,
        id: Option<&str>,
        name: Option<&str>,
        arguments: Option<&str>,
    ) {
        let builder = self.builders.entry(index).or_default();
        if let Some(id) = id {
            builder.id.push_str(id);
        }
        if let Some(name) = name {
            builder.name.push_str(name);
        }
        if let Some(arguments) = arguments {
            builder.arguments.push_str(arguments);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Freeze the accumulated fragments into completed calls, in index order.
    pub fn finish(self) -> Vec<MessageToolCall> {
        self.builders
            .into_values()
            .map(|b| MessageToolCall {
                id: b.id,
                name: b.name,
                arguments: b.arguments,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_concatenate_per_field() {
        let mut acc = ToolCallAccumulator::new();
        acc.apply(0, Some("call_1"), Some("search_fhir_patient"), Some(""));
        acc.apply(0, None, None, Some(r#"{"GIVEN""#));
        acc.apply(0, None, None, Some(r#":"John"}"#));

        let calls = acc.finish();
        assert_eq!(
            calls,
            vec![MessageToolCall {
                id: "call_1".into(),
                name: "search_fhir_patient".into(),
                arguments: r#"{"GIVEN":"John"}"#.into(),
            }]
        );
    }

    #[test]
    fn interleaved_indexes_stay_separate_and_ordered() {
        let mut acc = ToolCallAccumulator::new();
        // The model may interleave fragments of parallel calls
        acc.apply(1, Some("call_b"), Some("search_patient_condition"), None);
        acc.apply(0, Some("call_a"), Some("search_fhir_patient"), None);
        acc.apply(1, None, None, Some(r#"{"SUBJECT":"7"}"#));
        acc.apply(0, None, None, Some("{}"));

        let calls = acc.finish();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].id, "call_a");
        assert_eq!(calls[0].arguments, "{}");
        assert_eq!(calls[1].id, "call_b");
        assert_eq!(calls[1].arguments, r#"{"SUBJECT":"7"}"#);
    }

    #[test]
    fn new_index_does_not_close_earlier_ones() {
        let mut acc = ToolCallAccumulator::new();
        acc.apply(0, Some("call_a"), Some("search_fhir_patient"), Some("{"));
        acc.apply(1, Some("call_b"), Some("end_chat"), Some("{}"));
        // Late fragment for index 0 after index 1 appeared
        acc.apply(0, None, None, Some("}"));

        let calls = acc.finish();
        assert_eq!(calls[0].arguments, "{}");
        assert_eq!(calls[1].name, "end_chat");
    }

    #[test]
    fn empty_turn_produces_no_calls() {
        let acc = ToolCallAccumulator::new();
        assert!(acc.is_empty());
        assert!(acc.finish().is_empty());
    }
}
