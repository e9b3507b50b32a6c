//! # Waypoint Core
//!
//! Core traits and types for the Waypoint agent runtime: the declarative
//! tool contract model, the [`Tool`] trait, the uniform invocation result
//! envelope, the error taxonomy, and the conversation store.

pub mod conversation;
pub mod error;
pub mod result;
pub mod schema;
pub mod tool;

pub use conversation::{ChatMessage, Conversation, Role};
pub use error::{RegistryError, ToolError};
pub use result::InvokeResult;
pub use schema::{ParamSig, ParamSpec, ParamType, ToolExample, ToolSpec, ToolSpecBuilder};
pub use tool::{FnTool, Tool, ToolArgs};
