//! Error taxonomy for tool registration and dispatch.
//!
//! Two families with different propagation rules: [`ToolError`] covers
//! everything that can go wrong while looking up, validating, or executing
//! a tool, and is always contained into an [`crate::InvokeResult`] at the
//! registry boundary. [`RegistryError`] covers ill-formed registration and
//! is fatal at construction time; it never occurs mid-session.

use thiserror::Error;

/// Failures arising from tool lookup, input validation, or execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("tool '{name}' not found in registry")]
    NotFound { name: String },

    /// The supplied arguments violate the tool's declared contract.
    ///
    /// Carries every violated field, not just the first one found.
    #[error("invalid input for tool '{name}': {}", violations.join("; "))]
    InvalidInput {
        name: String,
        violations: Vec<String>,
    },

    /// The tool's own operation failed after validation passed.
    #[error("error executing tool '{name}': {message}")]
    ExecutionFailed { name: String, message: String },
}

impl ToolError {
    /// Stable machine-readable tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::NotFound { .. } => "tool_not_found",
            ToolError::InvalidInput { .. } => "invalid_tool_input",
            ToolError::ExecutionFailed { .. } => "tool_execution_error",
        }
    }

    /// Name of the tool the error refers to.
    pub fn tool_name(&self) -> &str {
        match self {
            ToolError::NotFound { name }
            | ToolError::InvalidInput { name, .. }
            | ToolError::ExecutionFailed { name, .. } => name,
        }
    }
}

/// Configuration failures raised at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A tool with this name is already registered; registration never
    /// silently overwrites.
    #[error("tool '{name}' is already registered")]
    DuplicateTool { name: String },

    /// The spec's required set names parameters it does not declare.
    #[error("malformed spec for tool '{name}': {detail}")]
    MalformedSpec { name: String, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_lists_all_violations() {
        let err = ToolError::InvalidInput {
            name: "get_route".into(),
            violations: vec![
                "missing required parameter 'origin'".into(),
                "unknown parameter 'color'".into(),
            ],
        };
        let rendered = err.to_string();
        assert!(rendered.contains("origin"));
        assert!(rendered.contains("color"));
        assert_eq!(err.kind(), "invalid_tool_input");
        assert_eq!(err.tool_name(), "get_route");
    }

    #[test]
    fn kinds_are_stable_tags() {
        let not_found = ToolError::NotFound { name: "x".into() };
        let failed = ToolError::ExecutionFailed {
            name: "x".into(),
            message: "m".into(),
        };
        assert_eq!(not_found.kind(), "tool_not_found");
        assert_eq!(failed.kind(), "tool_execution_error");
    }
}
