//! # Waypoint Tools
//!
//! The [`ToolRegistry`] — the single lookup and dispatch point through
//! which the reasoning loop runs capabilities — plus the built-in terminal
//! `answer` tool.

/// Built-in terminal answer tool.
pub mod answer;
/// Tool registry: registration, lookup, and contained dispatch.
pub mod registry;

pub use answer::{ANSWER_TOOL, AnswerTool};
pub use registry::ToolRegistry;
pub use waypoint_core::{
    FnTool, InvokeResult, ParamSig, RegistryError, Tool, ToolArgs, ToolError, ToolSpec,
};
