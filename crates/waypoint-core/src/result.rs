//! Uniform invocation result envelope.
//!
//! Every tool dispatch produces an [`InvokeResult`], success or failure.
//! The two states are a tagged union, so a result can never carry both a
//! value and an error, and the reasoning loop only ever inspects this
//! envelope rather than catching errors from tool bodies.

use serde_json::{Map, Value, json};

use crate::error::ToolError;

/// Outcome of one tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum InvokeResult {
    /// The tool ran to completion; `value` is its return value.
    Success {
        value: Value,
        metadata: Map<String, Value>,
    },
    /// Lookup, validation, or execution failed; the error carries a
    /// kind tag and message. Diagnostics live in `metadata`, never in a
    /// value field.
    Failure {
        error: ToolError,
        metadata: Map<String, Value>,
    },
}

impl InvokeResult {
    pub fn success(value: Value) -> Self {
        InvokeResult::Success {
            value,
            metadata: Map::new(),
        }
    }

    pub fn failure(error: ToolError) -> Self {
        InvokeResult::Failure {
            error,
            metadata: Map::new(),
        }
    }

    /// Attach an auxiliary metadata entry (diagnostic context, traces).
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        match &mut self {
            InvokeResult::Success { metadata, .. } | InvokeResult::Failure { metadata, .. } => {
                metadata.insert(key.into(), value);
            }
        }
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InvokeResult::Success { .. })
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            InvokeResult::Success { value, .. } => Some(value),
            InvokeResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ToolError> {
        match self {
            InvokeResult::Success { .. } => None,
            InvokeResult::Failure { error, .. } => Some(error),
        }
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        match self {
            InvokeResult::Success { metadata, .. } | InvokeResult::Failure { metadata, .. } => {
                metadata
            }
        }
    }

    /// Wire shape of the envelope: `{success, value|error, metadata}`.
    pub fn to_json(&self) -> Value {
        match self {
            InvokeResult::Success { value, metadata } => json!({
                "success": true,
                "value": value,
                "metadata": metadata,
            }),
            InvokeResult::Failure { error, metadata } => json!({
                "success": false,
                "error": { "kind": error.kind(), "message": error.to_string() },
                "metadata": metadata,
            }),
        }
    }

    /// Render the result as a short observation line for the conversation.
    ///
    /// Lists are summarized as a count plus a sample of at most three
    /// items; objects become key/value lines; anything else is printed
    /// directly. Failures render the error message so the model can see
    /// what went wrong and self-correct.
    pub fn summarize(&self, tool: &str) -> String {
        let value = match self {
            InvokeResult::Failure { error, .. } => {
                return format!("Error executing tool '{tool}': {error}");
            }
            InvokeResult::Success { value, .. } => value,
        };

        match value {
            Value::Array(items) if items.is_empty() => {
                format!("Tool '{tool}' returned an empty list.")
            }
            Value::Array(items) => {
                let sample: Vec<String> = items.iter().take(3).map(render_item).collect();
                format!(
                    "Tool '{tool}' returned {} items. Here's a sample:\n{}",
                    items.len(),
                    sample.join("\n")
                )
            }
            Value::Object(map) => {
                let lines: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", render_scalar(v)))
                    .collect();
                format!("Tool '{tool}' returned:\n{}", lines.join("\n"))
            }
            other => format!("Tool '{tool}' returned: {}", render_scalar(other)),
        }
    }
}

fn render_item(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{k}: {}", render_scalar(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => render_scalar(other),
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_and_failure_are_mutually_exclusive() {
        let ok = InvokeResult::success(json!(5));
        assert!(ok.is_success());
        assert_eq!(ok.value(), Some(&json!(5)));
        assert!(ok.error().is_none());

        let err = InvokeResult::failure(ToolError::NotFound { name: "x".into() });
        assert!(!err.is_success());
        assert!(err.value().is_none());
        assert!(err.error().is_some());
    }

    #[test]
    fn wire_shape_tags_errors_with_kind() {
        let err = InvokeResult::failure(ToolError::ExecutionFailed {
            name: "render_map".into(),
            message: "disk full".into(),
        })
        .with_metadata("trace", json!("io error at render_map"));

        let wire = err.to_json();
        assert_eq!(wire["success"], json!(false));
        assert_eq!(wire["error"]["kind"], json!("tool_execution_error"));
        assert_eq!(wire["metadata"]["trace"], json!("io error at render_map"));
        assert!(wire.get("value").is_none());
    }

    #[test]
    fn list_results_are_sampled() {
        let result = InvokeResult::success(json!([
            {"name": "Lake Tahoe", "kind": "lake"},
            {"name": "Donner Pass", "kind": "pass"},
            {"name": "Emerald Bay", "kind": "bay"},
            {"name": "Fallen Leaf", "kind": "lake"},
        ]));
        let summary = result.summarize("get_natural_features");
        assert!(summary.contains("returned 4 items"));
        assert!(summary.contains("Lake Tahoe"));
        assert!(!summary.contains("Fallen Leaf"));
    }

    #[test]
    fn scalar_results_print_inline() {
        let result = InvokeResult::success(json!(5.0));
        assert_eq!(result.summarize("add"), "Tool 'add' returned: 5.0");
    }

    #[test]
    fn failures_summarize_as_error_lines() {
        let result = InvokeResult::failure(ToolError::InvalidInput {
            name: "add".into(),
            violations: vec!["missing required parameter 'b'".into()],
        });
        let summary = result.summarize("add");
        assert!(summary.starts_with("Error executing tool 'add':"));
        assert!(summary.contains("'b'"));
    }
}
