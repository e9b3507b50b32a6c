//! # Waypoint Agent
//!
//! The reasoning loop that drives a tool-using agent: prompt assembly,
//! model querying, action parsing, tool dispatch, and observation
//! feedback, bounded by an iteration cap so termination never depends on
//! model behavior.

/// The bounded reasoning loop.
pub mod agent;
/// Agent-level errors.
pub mod error;
/// Model backend interface.
pub mod llm;
/// Ollama HTTP backend.
pub mod ollama;
/// Action extraction from raw model output.
pub mod parser;
/// System prompt and tool catalogue rendering.
pub mod prompt;

pub use agent::{Agent, AgentBuilder, DEFAULT_MAX_ITERATIONS};
pub use error::AgentError;
pub use llm::{ChunkIter, ModelClient, ModelError};
pub use ollama::OllamaClient;
pub use parser::{Action, NO_ACTION_RATIONALE, parse_action};
pub use prompt::{DEFAULT_SYSTEM_PROMPT, render_catalogue};
