//! Tool registration and dispatch.
//!
//! The registry owns the set of capabilities available to a reasoning
//! loop. It is built once before an agent starts serving queries and is
//! read-only afterwards, so an `Arc<ToolRegistry>` can be shared across
//! sessions without locking. Registration order is preserved: the
//! catalogue rendered into the model prompt lists tools in the order they
//! were registered, keeping prompts reproducible.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use waypoint_core::{
    FnTool, InvokeResult, ParamSig, RegistryError, Tool, ToolArgs, ToolError, ToolSpec,
};

/// Registry mapping tool names to implementations.
///
/// [`ToolRegistry::execute`] is the only path by which the reasoning loop
/// runs a tool: lookup, contract validation, and failure containment all
/// happen inside it, and every outcome comes back as an [`InvokeResult`].
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use waypoint_core::{ParamType, ToolSpec};
/// use waypoint_tools::ToolRegistry;
///
/// let mut registry = ToolRegistry::new();
/// let spec = ToolSpec::builder("add")
///     .description("Add two numbers")
///     .required_param("a", ParamType::Number, "First addend")
///     .required_param("b", ParamType::Number, "Second addend")
///     .build();
/// registry
///     .register_fn(spec, |args| {
///         let a = args["a"].as_f64().unwrap_or_default();
///         let b = args["b"].as_f64().unwrap_or_default();
///         Ok(json!(a + b))
///     })
///     .expect("well-formed spec");
///
/// let mut args = serde_json::Map::new();
/// args.insert("a".into(), json!(2));
/// args.insert("b".into(), json!(3));
/// assert_eq!(registry.execute("add", &args).value(), Some(&json!(5.0)));
/// ```
#[derive(Default)]
pub struct ToolRegistry {
    // Registration order; the index map gives O(1) lookup by name.
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under the name its spec declares.
    ///
    /// Rejects duplicate names and specs whose required set names an
    /// undeclared parameter; neither ever silently overwrites or repairs.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        let spec = tool.spec();
        let undeclared = spec.undeclared_required();
        if !undeclared.is_empty() {
            return Err(RegistryError::MalformedSpec {
                name: spec.name.clone(),
                detail: format!(
                    "required parameters not declared: {}",
                    undeclared.join(", ")
                ),
            });
        }
        if self.by_name.contains_key(&spec.name) {
            return Err(RegistryError::DuplicateTool {
                name: spec.name.clone(),
            });
        }
        tracing::debug!(tool = %spec.name, "registering tool");
        self.by_name.insert(spec.name.clone(), self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Register a closure with an explicit contract.
    pub fn register_fn<F>(&mut self, spec: ToolSpec, op: F) -> Result<(), RegistryError>
    where
        F: Fn(&ToolArgs) -> Result<Value, ToolError> + Send + Sync + 'static,
    {
        self.register(Arc::new(FnTool::new(spec, op)))
    }

    /// Register a closure, deriving its contract from a declared signature.
    ///
    /// Each signature entry becomes one parameter: an unspecified type
    /// defaults to string, and entries without a default value are marked
    /// required. The convenience mirror of [`ToolRegistry::register_fn`]
    /// for authors who skip writing the contract by hand.
    pub fn register_from_signature<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        signature: &[ParamSig],
        op: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&ToolArgs) -> Result<Value, ToolError> + Send + Sync + 'static,
    {
        let spec = ToolSpec::from_signature(name, description, signature);
        self.register_fn(spec, op)
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Result<&Arc<dyn Tool>, ToolError> {
        self.by_name
            .get(name)
            .map(|&idx| &self.tools[idx])
            .ok_or_else(|| ToolError::NotFound {
                name: name.to_string(),
            })
    }

    /// Look up, validate, and invoke a tool.
    ///
    /// This is the reasoning loop's sole dispatch path. Every failure mode
    /// (unknown tool, contract violation, execution error) is contained in
    /// the returned envelope; nothing propagates as a raw error. Execution
    /// failures carry diagnostic context in the envelope metadata, never
    /// in the value.
    pub fn execute(&self, name: &str, args: &ToolArgs) -> InvokeResult {
        let tool = match self.get(name) {
            Ok(tool) => tool,
            Err(err) => {
                tracing::warn!(tool = name, "dispatch to unknown tool");
                return InvokeResult::failure(err);
            }
        };

        if let Err(violations) = tool.spec().validate(args) {
            tracing::debug!(tool = name, ?violations, "input rejected by contract");
            let error = ToolError::InvalidInput {
                name: name.to_string(),
                violations: violations.clone(),
            };
            return InvokeResult::failure(error)
                .with_metadata("violations", Value::from(violations));
        }

        match tool.call(args) {
            Ok(value) => InvokeResult::success(value),
            Err(err) => {
                tracing::warn!(tool = name, error = %err, "tool execution failed");
                let detail = err.to_string();
                let error = match err {
                    // Normalize whatever the operation reported under the
                    // executing tool's name.
                    ToolError::ExecutionFailed { message, .. } => ToolError::ExecutionFailed {
                        name: name.to_string(),
                        message,
                    },
                    other => ToolError::ExecutionFailed {
                        name: name.to_string(),
                        message: other.to_string(),
                    },
                };
                InvokeResult::failure(error).with_metadata("trace", Value::from(detail))
            }
        }
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Tool contracts in registration order, for catalogue rendering.
    pub fn specs(&self) -> Vec<&ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
