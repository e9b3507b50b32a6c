//! Canned tools with call recording.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use waypoint_core::{ParamSpec, ParamType, Tool, ToolArgs, ToolError, ToolSpec};

/// A tool that returns predefined results, keyed by exact input.
///
/// Unmatched inputs fall back to the default result, or to a generic
/// success value when none is set. Clones share call-recording state, so
/// a test can keep a handle after registering the tool.
#[derive(Debug, Clone)]
pub struct MockTool {
    spec: ToolSpec,
    responses: Vec<(ToolArgs, Result<Value, String>)>,
    default_response: Option<Result<Value, String>>,
    calls: Arc<Mutex<Vec<ToolArgs>>>,
}

impl MockTool {
    /// A mock with an empty contract: no parameters, none required.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_spec(ToolSpec::builder(name).build())
    }

    /// A mock honoring a full contract, for validation-sensitive tests.
    pub fn with_spec(spec: ToolSpec) -> Self {
        Self {
            spec,
            responses: Vec::new(),
            default_response: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Declare a required parameter on the mock's contract.
    pub fn with_required_param(mut self, name: impl Into<String>, kind: ParamType) -> Self {
        let name = name.into();
        self.spec.required.push(name.clone());
        self.spec.params.push(ParamSpec::new(name, kind, ""));
        self
    }

    /// Declare an optional parameter on the mock's contract.
    pub fn with_optional_param(mut self, name: impl Into<String>, kind: ParamType) -> Self {
        self.spec.params.push(ParamSpec::new(name, kind, ""));
        self
    }

    /// Return `value` when called with exactly `input` (a JSON object).
    pub fn with_response(mut self, input: Value, value: Value) -> Self {
        self.responses.push((as_args(input), Ok(value)));
        self
    }

    /// Fail with `error` when called with exactly `input`.
    pub fn with_failure(mut self, input: Value, error: impl Into<String>) -> Self {
        self.responses.push((as_args(input), Err(error.into())));
        self
    }

    /// Return `value` for any unmatched input.
    pub fn with_default_response(mut self, value: Value) -> Self {
        self.default_response = Some(Ok(value));
        self
    }

    /// Fail with `error` for any unmatched input.
    pub fn with_default_failure(mut self, error: impl Into<String>) -> Self {
        self.default_response = Some(Err(error.into()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every argument set the tool was invoked with, in call order.
    pub fn call_history(&self) -> Vec<ToolArgs> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called_with(&self, input: &Value) -> bool {
        let wanted = as_args(input.clone());
        self.calls.lock().unwrap().contains(&wanted)
    }

    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn response_for(&self, args: &ToolArgs) -> Result<Value, String> {
        self.responses
            .iter()
            .find(|(input, _)| input == args)
            .map(|(_, result)| result.clone())
            .or_else(|| self.default_response.clone())
            .unwrap_or_else(|| Ok(Value::String(format!("mock response from '{}'", self.spec.name))))
    }
}

fn as_args(input: Value) -> ToolArgs {
    input.as_object().cloned().unwrap_or_default()
}

impl Tool for MockTool {
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn call(&self, args: &ToolArgs) -> Result<Value, ToolError> {
        self.calls.lock().unwrap().push(args.clone());
        self.response_for(args).map_err(|message| ToolError::ExecutionFailed {
            name: self.spec.name.clone(),
            message,
        })
    }
}
