//! Declarative tool contracts.
//!
//! A [`ToolSpec`] describes the shape a tool's input must satisfy: its
//! parameters, their semantic types, which of them are required, and
//! illustrative usage examples. Specs are rendered into the model-facing
//! catalogue and enforced at dispatch time, so the same declaration serves
//! both as documentation for the model and as the validation contract for
//! untrusted input.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tool::ToolArgs;

/// Semantic type of a tool parameter.
///
/// These map onto the JSON value space; validation checks the declared
/// type against the runtime shape of the supplied value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParamType {
    /// Name used in catalogue output and violation messages.
    pub fn name(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }

    /// Check whether a JSON value matches this semantic type.
    ///
    /// Integers are accepted where a number is declared, since JSON does
    /// not distinguish the two on the wire.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Number => value.is_number(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::Array => value.is_array(),
            ParamType::Object => value.is_object(),
        }
    }

    /// Describe the runtime shape of a JSON value, for violation messages.
    pub fn of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Declaration of a single tool parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamType,
    #[serde(default)]
    pub description: String,
    /// Default value used when the parameter is omitted. Parameters with a
    /// default are optional by construction in the signature-derived path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, kind: ParamType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Illustrative invocation for the model-facing catalogue.
///
/// Examples are documentation only; they are never validated against the
/// contract they accompany.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolExample {
    pub input: ToolArgs,
    #[serde(default)]
    pub reasoning: String,
}

/// One parameter of a declared operation signature.
///
/// Used by the signature-derived registration path: a parameter with no
/// declared type defaults to `string`, and a parameter with no default
/// value becomes required.
#[derive(Debug, Clone, Default)]
pub struct ParamSig {
    pub name: String,
    pub kind: Option<ParamType>,
    pub description: String,
    pub default: Option<Value>,
}

impl ParamSig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: ParamType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn default_value(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Full contract for one tool: name, description, parameter shape,
/// required set, and usage examples.
///
/// Parameter order is declaration order and is preserved in any listing
/// shown to the model, so catalogue output stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ToolExample>,
}

impl ToolSpec {
    /// Start building a spec with an explicit contract.
    pub fn builder(name: impl Into<String>) -> ToolSpecBuilder {
        ToolSpecBuilder {
            spec: ToolSpec {
                name: name.into(),
                ..ToolSpec::default()
            },
        }
    }

    /// Derive a spec from a declared operation signature.
    ///
    /// Each signature entry maps to one parameter: an unspecified type
    /// degrades to `string`, and entries without a default value are added
    /// to the required set. This trades finer per-field contracts for
    /// registration convenience; use [`ToolSpec::builder`] when stricter
    /// contracts are needed.
    pub fn from_signature(
        name: impl Into<String>,
        description: impl Into<String>,
        signature: &[ParamSig],
    ) -> Self {
        let mut params = Vec::with_capacity(signature.len());
        let mut required = Vec::new();
        for sig in signature {
            if sig.default.is_none() {
                required.push(sig.name.clone());
            }
            params.push(ParamSpec {
                name: sig.name.clone(),
                kind: sig.kind.unwrap_or_default(),
                description: sig.description.clone(),
                default: sig.default.clone(),
            });
        }
        ToolSpec {
            name: name.into(),
            description: description.into(),
            params,
            required,
            examples: Vec::new(),
        }
    }

    /// Look up a parameter declaration by name.
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Names in `required` that do not correspond to a declared parameter.
    ///
    /// A non-empty return marks the spec as ill-formed; registration
    /// rejects it with a configuration error.
    pub fn undeclared_required(&self) -> Vec<String> {
        self.required
            .iter()
            .filter(|name| self.param(name).is_none())
            .cloned()
            .collect()
    }

    /// Validate an argument mapping against this contract.
    ///
    /// Collects every violation rather than stopping at the first: unknown
    /// keys, missing required keys, and declared-type mismatches. Returns
    /// `Ok(())` when the mapping satisfies the contract.
    pub fn validate(&self, args: &ToolArgs) -> Result<(), Vec<String>> {
        let mut violations = Vec::new();

        for key in args.keys() {
            if self.param(key).is_none() {
                violations.push(format!("unknown parameter '{key}'"));
            }
        }

        for name in &self.required {
            if !args.contains_key(name.as_str()) {
                violations.push(format!("missing required parameter '{name}'"));
            }
        }

        for param in &self.params {
            if let Some(value) = args.get(param.name.as_str())
                && !param.kind.matches(value)
            {
                violations.push(format!(
                    "parameter '{}': expected {}, got {}",
                    param.name,
                    param.kind,
                    ParamType::of(value)
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Builder for explicit tool contracts.
#[derive(Debug, Default)]
pub struct ToolSpecBuilder {
    spec: ToolSpec,
}

impl ToolSpecBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.spec.description = description.into();
        self
    }

    /// Declare a required parameter.
    pub fn required_param(
        mut self,
        name: impl Into<String>,
        kind: ParamType,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.spec.required.push(name.clone());
        self.spec.params.push(ParamSpec::new(name, kind, description));
        self
    }

    /// Declare an optional parameter.
    pub fn optional_param(
        mut self,
        name: impl Into<String>,
        kind: ParamType,
        description: impl Into<String>,
    ) -> Self {
        self.spec.params.push(ParamSpec::new(name, kind, description));
        self
    }

    /// Declare an optional parameter with a default value.
    pub fn optional_param_with_default(
        mut self,
        name: impl Into<String>,
        kind: ParamType,
        description: impl Into<String>,
        default: Value,
    ) -> Self {
        self.spec
            .params
            .push(ParamSpec::new(name, kind, description).with_default(default));
        self
    }

    pub fn example(mut self, example: ToolExample) -> Self {
        self.spec.examples.push(example);
        self
    }

    pub fn build(self) -> ToolSpec {
        self.spec
    }
}
