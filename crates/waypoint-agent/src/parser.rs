//! Action extraction from raw model output.
//!
//! Two-stage parse: find the delimited `<action>` block, then decode its
//! content as a strict JSON record with `capability`, `input`, and
//! `rationale` fields. The parser is total — any text it cannot
//! confidently interpret as a capability request degrades to a terminal
//! answer rather than an error, so the reasoning loop always has a
//! well-formed [`Action`] to act on. The two degraded outcomes stay
//! distinct: a missing block and a malformed block are different variants
//! with different rationales.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use waypoint_core::ToolArgs;
use waypoint_tools::ANSWER_TOOL;

/// Fixed rationale marker used when the response carries no action block.
pub const NO_ACTION_RATIONALE: &str = "no action block found";

const NO_RATIONALE: &str = "No rationale provided.";

static ACTION_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<action>(.*?)</action>").expect("valid regex"));
static TRAILING_COMMA_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*\}").expect("valid regex"));
static TRAILING_COMMA_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*\]").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// A parsed intent extracted from one model turn.
///
/// The three variants make the loop's branches exhaustive: either the
/// model requested a capability, or its output degrades to a terminal
/// answer through one of the two fallbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A well-formed request to invoke a capability.
    Invoke {
        capability: String,
        input: ToolArgs,
        rationale: String,
    },
    /// No action block was present; the whole response is the answer.
    Answer { text: String, rationale: String },
    /// An action block was present but its content was not a well-formed
    /// record; treated as a terminal answer with the failure as rationale.
    Malformed { text: String, rationale: String },
}

impl Action {
    /// The capability name this action resolves to; both fallback
    /// variants resolve to the terminal answer name.
    pub fn capability(&self) -> &str {
        match self {
            Action::Invoke { capability, .. } => capability,
            Action::Answer { .. } | Action::Malformed { .. } => ANSWER_TOOL,
        }
    }

    /// Whether this action terminates the reasoning loop.
    pub fn is_terminal(&self) -> bool {
        self.capability() == ANSWER_TOOL
    }

    pub fn rationale(&self) -> &str {
        match self {
            Action::Invoke { rationale, .. }
            | Action::Answer { rationale, .. }
            | Action::Malformed { rationale, .. } => rationale,
        }
    }

    /// The action's input rendered as answer text.
    ///
    /// For fallback variants this is the original response text; for an
    /// explicit `answer` invocation it is the `text` parameter; for any
    /// other capability it is the serialized input mapping (used for the
    /// best-effort return when the iteration cap is exhausted).
    pub fn input_text(&self) -> String {
        match self {
            Action::Answer { text, .. } | Action::Malformed { text, .. } => text.clone(),
            Action::Invoke { input, .. } => match input.get("text") {
                Some(Value::String(text)) => text.trim().to_owned(),
                Some(other) => other.to_string(),
                None => Value::Object(input.clone()).to_string(),
            },
        }
    }
}

/// Extract an [`Action`] from one raw model response.
pub fn parse_action(response: &str) -> Action {
    let Some(captures) = ACTION_BLOCK.captures(response) else {
        tracing::debug!("no action block in model response");
        return Action::Answer {
            text: response.trim().to_owned(),
            rationale: NO_ACTION_RATIONALE.to_owned(),
        };
    };

    let block = captures[1].trim().to_owned();
    match decode_record(&block) {
        Ok(record) => coerce_record(record),
        Err(err) => {
            tracing::warn!(error = %err, "action block failed to parse");
            Action::Malformed {
                text: response.trim().to_owned(),
                rationale: format!("failed to parse action JSON: {err}"),
            }
        }
    }
}

/// Decode the block content, applying the repair passes models commonly
/// need: single quotes for double quotes, trailing commas, and a final
/// whitespace-compaction retry.
fn decode_record(block: &str) -> Result<ToolArgs, serde_json::Error> {
    let repaired = block.replace('\'', "\"");
    let repaired = TRAILING_COMMA_OBJECT.replace_all(&repaired, "}");
    let repaired = TRAILING_COMMA_ARRAY.replace_all(&repaired, "]");

    match serde_json::from_str::<ToolArgs>(&repaired) {
        Ok(record) => Ok(record),
        Err(first_err) => {
            let compact = WHITESPACE.replace_all(&repaired, "");
            serde_json::from_str::<ToolArgs>(&compact).map_err(|_| first_err)
        }
    }
}

/// Fill in missing or ill-shaped record fields the way the model-facing
/// protocol promises: absent capability means "answer", a non-object
/// input is wrapped as `{"text": ...}`.
fn coerce_record(mut record: ToolArgs) -> Action {
    let capability = match record.remove("capability") {
        Some(Value::String(name)) => name,
        _ => ANSWER_TOOL.to_owned(),
    };
    let input = match record.remove("input") {
        Some(Value::Object(map)) => map,
        Some(Value::String(text)) => {
            let mut map = ToolArgs::new();
            map.insert("text".into(), Value::String(text));
            map
        }
        Some(other) => {
            let mut map = ToolArgs::new();
            map.insert("text".into(), Value::String(other.to_string()));
            map
        }
        None => ToolArgs::new(),
    };
    let rationale = match record.remove("rationale") {
        Some(Value::String(rationale)) => rationale,
        _ => NO_RATIONALE.to_owned(),
    };
    Action::Invoke {
        capability,
        input,
        rationale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_block_round_trips() {
        let response = r#"<thinking>Adding the numbers.</thinking>
<action>
{"capability": "add", "input": {"a": 1, "b": 2}, "rationale": "sum"}
</action>"#;
        let action = parse_action(response);
        match action {
            Action::Invoke {
                capability,
                input,
                rationale,
            } => {
                assert_eq!(capability, "add");
                assert_eq!(Value::Object(input), json!({"a": 1, "b": 2}));
                assert_eq!(rationale, "sum");
            }
            other => panic!("expected Invoke, got {other:?}"),
        }
    }

    #[test]
    fn plain_text_becomes_answer_with_fixed_marker() {
        let action = parse_action("The distance is 42 km.");
        assert_eq!(
            action,
            Action::Answer {
                text: "The distance is 42 km.".into(),
                rationale: NO_ACTION_RATIONALE.into(),
            }
        );
        assert_eq!(action.capability(), "answer");
        assert!(action.is_terminal());
        assert_eq!(action.input_text(), "The distance is 42 km.");
    }

    #[test]
    fn unclosed_json_becomes_malformed_not_answer() {
        let response = "<action>{\"capability\": \"add\", \"input\": {\"a\": 1</action>";
        let action = parse_action(response);
        match &action {
            Action::Malformed { rationale, .. } => {
                assert!(rationale.starts_with("failed to parse action JSON"));
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
        // Still terminal, but observably distinct from the no-block case.
        assert!(action.is_terminal());
        assert_ne!(action.rationale(), NO_ACTION_RATIONALE);
    }

    #[test]
    fn single_quotes_and_trailing_commas_are_repaired() {
        let response = "<action>{'capability': 'get_route', 'input': {'origin': [1, 2],}, 'rationale': 'route',}</action>";
        let action = parse_action(response);
        match action {
            Action::Invoke {
                capability, input, ..
            } => {
                assert_eq!(capability, "get_route");
                assert_eq!(input["origin"], json!([1, 2]));
            }
            other => panic!("expected Invoke, got {other:?}"),
        }
    }

    #[test]
    fn missing_fields_are_defaulted() {
        let action = parse_action("<action>{\"input\": {\"text\": \"done\"}}</action>");
        match &action {
            Action::Invoke {
                capability,
                rationale,
                ..
            } => {
                assert_eq!(capability, "answer");
                assert_eq!(rationale, NO_RATIONALE);
            }
            other => panic!("expected Invoke, got {other:?}"),
        }
        assert_eq!(action.input_text(), "done");
    }

    #[test]
    fn non_object_input_is_wrapped_as_text() {
        let action =
            parse_action("<action>{\"capability\": \"answer\", \"input\": \"All set.\"}</action>");
        match &action {
            Action::Invoke { input, .. } => {
                assert_eq!(input["text"], json!("All set."));
            }
            other => panic!("expected Invoke, got {other:?}"),
        }
    }

    #[test]
    fn explicit_answer_invocation_is_terminal() {
        let action = parse_action(
            "<action>{\"capability\": \"answer\", \"input\": {\"text\": \"The sum is 5.\"}, \"rationale\": \"done\"}</action>",
        );
        assert!(action.is_terminal());
        assert_eq!(action.input_text(), "The sum is 5.");
    }

    #[test]
    fn block_spanning_multiple_lines_is_found() {
        let response = "prefix\n<action>\n{\n  \"capability\": \"render_map\",\n  \"input\": {}\n}\n</action>\nsuffix";
        assert!(matches!(parse_action(response), Action::Invoke { .. }));
    }
}
