//! # Waypoint
//!
//! A bounded tool-calling reasoning runtime for language-model agents.
//!
//! Waypoint turns a free-form language model into a tool-using agent: it
//! publishes a schema-validated tool catalogue, parses each model reply
//! into a structured action, executes the requested tool, and feeds a
//! summarized observation back, looping until the model answers or an
//! iteration cap fires. Unparseable replies degrade into answers and tool
//! failures become observations, so one model query always produces one
//! final answer.
//!
//! ```no_run
//! use std::sync::Arc;
//! use waypoint::{Agent, OllamaClient, ParamType, ToolRegistry, ToolSpec};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut registry = ToolRegistry::new();
//!     registry.register_fn(
//!         ToolSpec::builder("add")
//!             .description("Add two numbers")
//!             .required_param("a", ParamType::Number, "First addend")
//!             .required_param("b", ParamType::Number, "Second addend")
//!             .build(),
//!         |args| {
//!             let a = args["a"].as_f64().unwrap_or_default();
//!             let b = args["b"].as_f64().unwrap_or_default();
//!             Ok(serde_json::json!(a + b))
//!         },
//!     )?;
//!
//!     let mut agent = Agent::builder(OllamaClient::new(), Arc::new(registry)).build();
//!     let answer = agent.process_query("What is 2 + 3?")?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

pub use waypoint_agent::{
    Action, Agent, AgentBuilder, AgentError, ChunkIter, DEFAULT_MAX_ITERATIONS,
    DEFAULT_SYSTEM_PROMPT, ModelClient, ModelError, OllamaClient, parse_action, render_catalogue,
};
pub use waypoint_core::{
    ChatMessage, Conversation, FnTool, InvokeResult, ParamSig, ParamSpec, ParamType, RegistryError,
    Role, Tool, ToolArgs, ToolError, ToolExample, ToolSpec, ToolSpecBuilder,
};
pub use waypoint_tools::{ANSWER_TOOL, AnswerTool, ToolRegistry};
