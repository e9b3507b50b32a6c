//! The terminal `answer` tool.
//!
//! `answer` is the reserved name signalling loop completion. The reasoning
//! loop treats it as a sentinel and never dispatches it, but it is also
//! registered as an ordinary tool so the catalogue advertises it to the
//! model and direct invocation still behaves sensibly.

use serde_json::Value;
use waypoint_core::{ParamType, Tool, ToolArgs, ToolError, ToolSpec};

/// Reserved tool name that terminates the reasoning loop.
pub const ANSWER_TOOL: &str = "answer";

/// Echoes its `text` parameter back as the final answer.
pub struct AnswerTool {
    spec: ToolSpec,
}

impl AnswerTool {
    pub fn new() -> Self {
        let spec = ToolSpec::builder(ANSWER_TOOL)
            .description("Provide a natural language answer using memory and reasoning.")
            .required_param("text", ParamType::String, "The answer text for the user")
            .build();
        Self { spec }
    }
}

impl Default for AnswerTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for AnswerTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn call(&self, args: &ToolArgs) -> Result<Value, ToolError> {
        Ok(args.get("text").cloned().unwrap_or(Value::Null))
    }
}
