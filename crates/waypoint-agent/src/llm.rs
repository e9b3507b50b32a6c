//! Model backend interface.
//!
//! The reasoning loop consumes language models through this narrow seam:
//! an availability probe, a blocking chat call, and a streamed variant
//! whose concatenated fragments equal the non-streamed content. Backends
//! are otherwise opaque to the loop.

use thiserror::Error;
use waypoint_core::ChatMessage;

/// Failures from the model backend.
///
/// These are the only errors the reasoning loop treats as fatal for the
/// current call; everything downstream of a successful model reply is
/// contained elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The backend could not be reached at all.
    #[error("model backend unreachable: {0}")]
    Unreachable(String),

    /// The backend was reached but the request failed.
    #[error("model request failed: {0}")]
    Request(String),

    /// The backend replied with something that could not be decoded.
    #[error("malformed model response: {0}")]
    Malformed(String),
}

/// Lazily-produced, finite sequence of response fragments.
pub type ChunkIter<'a> = Box<dyn Iterator<Item = Result<String, ModelError>> + 'a>;

/// A language model backend the reasoning loop can query.
pub trait ModelClient {
    /// Whether the backend is reachable; gates any query attempt.
    fn is_available(&self) -> bool;

    /// Send a conversation and return the full response text.
    fn chat(&self, messages: &[ChatMessage]) -> Result<String, ModelError>;

    /// Send a conversation and consume the response incrementally.
    ///
    /// The concatenation of all yielded fragments must equal what
    /// [`ModelClient::chat`] would have returned for the same input.
    fn stream_chat(&self, messages: &[ChatMessage]) -> Result<ChunkIter<'_>, ModelError>;
}
