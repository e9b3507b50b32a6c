//! Agent-level errors.
//!
//! Only two conditions escape `process_query` as hard failures: the
//! backend being unavailable before any query is attempted, and a
//! transport failure mid-call. Tool and parser failures are recoverable
//! by design and never surface here.

use thiserror::Error;

use crate::llm::ModelError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// The model backend did not pass its availability check; nothing was
    /// queried and the conversation was left untouched.
    #[error("model backend is not available")]
    BackendUnavailable,

    /// The model backend failed during the call. Fatal for this query
    /// only; the registry and conversation remain intact.
    #[error(transparent)]
    Backend(#[from] ModelError),
}
