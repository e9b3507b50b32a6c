//! Scripted model client for deterministic loop testing.

use std::sync::{Arc, Mutex};

use waypoint_agent::{ChunkIter, ModelClient, ModelError};
use waypoint_core::ChatMessage;

/// How many characters each streamed fragment carries.
const CHUNK_SIZE: usize = 10;

/// A model client that replays a fixed script of replies.
///
/// Replies are returned in order and cycle once exhausted, so a looping
/// agent keeps getting the last phase of the script instead of an error.
/// Streaming yields the same text split into small fragments, which makes
/// streamed and blocking runs directly comparable. Clones share state:
/// keep one handle in the test while the agent owns the other.
#[derive(Debug, Clone)]
pub struct ScriptedModel {
    replies: Vec<String>,
    cursor: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    available: Arc<Mutex<bool>>,
}

impl ScriptedModel {
    pub fn new<S: Into<String>>(replies: impl IntoIterator<Item = S>) -> Self {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            cursor: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            available: Arc::new(Mutex::new(true)),
        }
    }

    /// A model whose availability check fails.
    pub fn unavailable() -> Self {
        let model = Self::new(Vec::<String>::new());
        model.set_available(false);
        model
    }

    pub fn set_available(&self, available: bool) {
        *self.available.lock().unwrap() = available;
    }

    /// How many times the model has been queried.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Full message sets received, one entry per query.
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }

    /// Reset the script position and recorded requests.
    pub fn reset(&self) {
        *self.cursor.lock().unwrap() = 0;
        self.requests.lock().unwrap().clear();
    }

    fn next_reply(&self, messages: &[ChatMessage]) -> Result<String, ModelError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        if self.replies.is_empty() {
            return Err(ModelError::Request("no scripted replies".into()));
        }
        let mut cursor = self.cursor.lock().unwrap();
        let reply = self.replies[*cursor % self.replies.len()].clone();
        *cursor += 1;
        Ok(reply)
    }
}

impl ModelClient for ScriptedModel {
    fn is_available(&self) -> bool {
        *self.available.lock().unwrap()
    }

    fn chat(&self, messages: &[ChatMessage]) -> Result<String, ModelError> {
        self.next_reply(messages)
    }

    fn stream_chat(&self, messages: &[ChatMessage]) -> Result<ChunkIter<'_>, ModelError> {
        let reply = self.next_reply(messages)?;
        let chars: Vec<char> = reply.chars().collect();
        let chunks: Vec<Result<String, ModelError>> = chars
            .chunks(CHUNK_SIZE)
            .map(|c| Ok(c.iter().collect()))
            .collect();
        Ok(Box::new(chunks.into_iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_cycle_when_exhausted() {
        let model = ScriptedModel::new(["one", "two"]);
        assert_eq!(model.chat(&[]).unwrap(), "one");
        assert_eq!(model.chat(&[]).unwrap(), "two");
        assert_eq!(model.chat(&[]).unwrap(), "one");
        assert_eq!(model.request_count(), 3);
    }

    #[test]
    fn streaming_reassembles_to_the_blocking_reply() {
        let model = ScriptedModel::new(["a rather long scripted reply"]);
        let streamed: String = model
            .stream_chat(&[])
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
            .concat();
        model.reset();
        assert_eq!(streamed, model.chat(&[]).unwrap());
    }

    #[test]
    fn clones_share_recording_state() {
        let model = ScriptedModel::new(["hi"]);
        let handle = model.clone();
        model.chat(&[ChatMessage::user("hello")]).unwrap();
        assert_eq!(handle.request_count(), 1);
        assert_eq!(handle.requests()[0][0].content, "hello");
    }

    #[test]
    fn empty_script_reports_a_request_error() {
        let model = ScriptedModel::new(Vec::<String>::new());
        assert!(model.chat(&[]).is_err());
    }
}
