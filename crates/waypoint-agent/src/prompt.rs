//! System prompt and tool catalogue rendering.
//!
//! The catalogue is rendered from the registry's specs in registration
//! order, so the same registry always produces the same prompt text.

use serde_json::{Value, json};
use waypoint_core::ToolSpec;

/// Default system instructions teaching the action protocol.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a helpful assistant that can use tools to accomplish tasks.

When you want to use a tool, respond with a <thinking> and an <action> block. Always follow this format:

<thinking>
Explain your reasoning process for choosing a tool.
</thinking>
<action>
{
  "capability": "tool_name",
  "input": { ... },
  "rationale": "Explain why the tool helps answer the question."
}
</action>

If no tool is needed, respond with a final plain-text answer.

IMPORTANT:
Every tool call MUST be wrapped in an <action> block. Tool calls outside of this format will not be run.
If a tool has already been used and the user asks a follow-up about that result, use the "answer" capability with a response based on the conversation so far. Do NOT call the same tool again unless the inputs differ."#;

/// Render the capability catalogue for the model-facing prompt.
///
/// For each tool: name, description, each parameter as
/// `name (type, required|optional): description`, and any examples as
/// ready-to-imitate action blocks.
pub fn render_catalogue(specs: &[&ToolSpec]) -> String {
    let mut out = String::from("Available tools:\n");
    for spec in specs {
        out.push_str(&format!("\n## {}\n", spec.name));
        if !spec.description.is_empty() {
            out.push_str(&spec.description);
            out.push('\n');
        }
        if !spec.params.is_empty() {
            out.push_str("Parameters:\n");
            for param in &spec.params {
                let requirement = if spec.required.contains(&param.name) {
                    "required"
                } else {
                    "optional"
                };
                out.push_str(&format!(
                    "- {} ({}, {}): {}\n",
                    param.name, param.kind, requirement, param.description
                ));
            }
        }
        for example in &spec.examples {
            let record = json!({
                "capability": spec.name,
                "input": Value::Object(example.input.clone()),
                "rationale": example.reasoning,
            });
            let rendered =
                serde_json::to_string_pretty(&record).unwrap_or_else(|_| record.to_string());
            out.push_str(&format!("Example:\n<action>\n{rendered}\n</action>\n"));
        }
    }
    out
}
