//! The tool abstraction.
//!
//! A tool binds a name to an invocable operation through a declared
//! contract. Implementations receive a named-argument mapping that has
//! already been validated against their [`ToolSpec`] and return any
//! JSON-serializable value, signalling failure through [`ToolError`].

use serde_json::Value;

use crate::error::ToolError;
use crate::schema::ToolSpec;

/// Named arguments passed to a tool invocation.
pub type ToolArgs = serde_json::Map<String, Value>;

/// An invocable capability the reasoning loop may dispatch.
///
/// Tools are trusted code; only their input is untrusted, which is why the
/// registry validates arguments against [`Tool::spec`] before ever calling
/// [`Tool::call`]. Implementations must be shareable across sessions.
///
/// # Example
///
/// ```rust
/// use serde_json::{Value, json};
/// use waypoint_core::{ParamType, Tool, ToolArgs, ToolError, ToolSpec};
///
/// struct AddTool {
///     spec: ToolSpec,
/// }
///
/// impl AddTool {
///     fn new() -> Self {
///         let spec = ToolSpec::builder("add")
///             .description("Add two numbers")
///             .required_param("a", ParamType::Number, "First addend")
///             .required_param("b", ParamType::Number, "Second addend")
///             .build();
///         Self { spec }
///     }
/// }
///
/// impl Tool for AddTool {
///     fn spec(&self) -> &ToolSpec {
///         &self.spec
///     }
///
///     fn call(&self, args: &ToolArgs) -> Result<Value, ToolError> {
///         let a = args["a"].as_f64().unwrap_or_default();
///         let b = args["b"].as_f64().unwrap_or_default();
///         Ok(json!(a + b))
///     }
/// }
/// ```
pub trait Tool: Send + Sync {
    /// The contract this tool's input must satisfy.
    fn spec(&self) -> &ToolSpec;

    /// Unique name the tool is registered under.
    fn name(&self) -> &str {
        &self.spec().name
    }

    /// Execute the operation with validated arguments.
    ///
    /// Errors returned here are contained into the invocation result
    /// envelope at the registry boundary; they never reach the reasoning
    /// loop as raw errors.
    fn call(&self, args: &ToolArgs) -> Result<Value, ToolError>;
}

/// Adapter that turns a closure plus a contract into a [`Tool`].
///
/// This is the registration currency for the functional paths
/// (`register_fn`, `register_from_signature`): capability authors supply
/// the operation body, the contract travels alongside it.
pub struct FnTool<F> {
    spec: ToolSpec,
    op: F,
}

impl<F> FnTool<F>
where
    F: Fn(&ToolArgs) -> Result<Value, ToolError> + Send + Sync,
{
    pub fn new(spec: ToolSpec, op: F) -> Self {
        Self { spec, op }
    }
}

impl<F> Tool for FnTool<F>
where
    F: Fn(&ToolArgs) -> Result<Value, ToolError> + Send + Sync,
{
    fn spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn call(&self, args: &ToolArgs) -> Result<Value, ToolError> {
        (self.op)(args)
    }
}
