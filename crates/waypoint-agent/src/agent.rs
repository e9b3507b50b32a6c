//! The bounded reasoning loop.
//!
//! An [`Agent`] owns one conversation session and drives the
//! generate → parse → execute → observe cycle: it assembles a prompt from
//! the system instructions, the tool catalogue, and the conversation,
//! queries the model, parses the reply into an [`Action`], dispatches
//! non-terminal actions through the registry, and feeds the summarized
//! result back as an observation. A configurable iteration cap guarantees
//! termination no matter what the model does.

use std::sync::Arc;

use waypoint_core::{ChatMessage, Conversation, Role};
use waypoint_tools::ToolRegistry;

use crate::error::AgentError;
use crate::llm::ModelClient;
use crate::parser::{Action, parse_action};
use crate::prompt::{DEFAULT_SYSTEM_PROMPT, render_catalogue};

/// Default iteration cap for one query.
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// A tool-using agent session.
///
/// The registry is shared read-only; the conversation is exclusively
/// owned by this session and grows across queries, providing multi-turn
/// context.
pub struct Agent<M: ModelClient> {
    model: M,
    registry: Arc<ToolRegistry>,
    conversation: Conversation,
    system_prompt: String,
    max_iterations: usize,
    streaming: bool,
}

impl<M: ModelClient> Agent<M> {
    pub fn builder(model: M, registry: Arc<ToolRegistry>) -> AgentBuilder<M> {
        AgentBuilder {
            model,
            registry,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_owned(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            streaming: false,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Run one query through the reasoning loop to a final answer.
    ///
    /// Tool failures and unparseable model output are recoverable by
    /// design: the former become observations the model can react to, the
    /// latter degrade to terminal answers. Only backend failures are
    /// fatal, and they leave the conversation and registry intact.
    pub fn process_query(&mut self, query: &str) -> Result<String, AgentError> {
        if !self.model.is_available() {
            tracing::error!("model backend failed availability check");
            return Err(AgentError::BackendUnavailable);
        }

        self.conversation.push(Role::User, query);
        let mut iterations = 0;

        loop {
            let messages = self.assemble_prompt();
            let reply = self.generate(&messages)?;
            self.conversation.push(Role::Assistant, reply.clone());

            let action = parse_action(&reply);
            tracing::debug!(
                capability = action.capability(),
                iteration = iterations,
                "parsed action"
            );

            if action.is_terminal() {
                return Ok(action.input_text());
            }

            if let Action::Invoke {
                capability, input, ..
            } = &action
            {
                let result = self.registry.execute(capability, input);
                tracing::info!(
                    capability,
                    success = result.is_success(),
                    iteration = iterations,
                    "dispatched tool"
                );
                let observation = format!("Observation: {}", result.summarize(capability));
                self.conversation.push(Role::User, observation);
            }

            iterations += 1;
            if iterations >= self.max_iterations {
                tracing::warn!(
                    cap = self.max_iterations,
                    "iteration cap reached; returning best-effort answer"
                );
                return Ok(action.input_text());
            }
        }
    }

    /// System instructions plus catalogue, then the full conversation.
    fn assemble_prompt(&self) -> Vec<ChatMessage> {
        let catalogue = render_catalogue(&self.registry.specs());
        let mut messages =
            vec![ChatMessage::system(format!("{}\n\n{catalogue}", self.system_prompt))];
        messages.extend(self.conversation.messages().iter().cloned());
        messages
    }

    fn generate(&self, messages: &[ChatMessage]) -> Result<String, AgentError> {
        if self.streaming {
            let mut full = String::new();
            for chunk in self.model.stream_chat(messages)? {
                full.push_str(&chunk?);
            }
            Ok(full)
        } else {
            Ok(self.model.chat(messages)?)
        }
    }
}

/// Builder for [`Agent`] sessions.
pub struct AgentBuilder<M: ModelClient> {
    model: M,
    registry: Arc<ToolRegistry>,
    system_prompt: String,
    max_iterations: usize,
    streaming: bool,
}

impl<M: ModelClient> AgentBuilder<M> {
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn max_iterations(mut self, cap: usize) -> Self {
        self.max_iterations = cap.max(1);
        self
    }

    /// Consume model replies as streamed fragments instead of one blocking
    /// response. The loop behaves identically either way.
    pub fn streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub fn build(self) -> Agent<M> {
        Agent {
            model: self.model,
            registry: self.registry,
            conversation: Conversation::new(),
            system_prompt: self.system_prompt,
            max_iterations: self.max_iterations,
            streaming: self.streaming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChunkIter, ModelError};
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use waypoint_core::{ParamType, ToolSpec};

    struct ScriptedClient {
        replies: RefCell<VecDeque<String>>,
        available: bool,
    }

    impl ScriptedClient {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: RefCell::new(replies.iter().map(|s| s.to_string()).collect()),
                available: true,
            }
        }

        fn unavailable() -> Self {
            Self {
                replies: RefCell::new(VecDeque::new()),
                available: false,
            }
        }
    }

    impl ModelClient for ScriptedClient {
        fn is_available(&self) -> bool {
            self.available
        }

        fn chat(&self, _messages: &[ChatMessage]) -> Result<String, ModelError> {
            let mut replies = self.replies.borrow_mut();
            let next = replies
                .pop_front()
                .ok_or_else(|| ModelError::Request("script exhausted".into()))?;
            // Repeat the last reply forever, like a stuck model.
            if replies.is_empty() {
                replies.push_back(next.clone());
            }
            Ok(next)
        }

        fn stream_chat(&self, messages: &[ChatMessage]) -> Result<ChunkIter<'_>, ModelError> {
            let full = self.chat(messages)?;
            let chunks: Vec<Result<String, ModelError>> = full
                .chars()
                .collect::<Vec<_>>()
                .chunks(7)
                .map(|c| Ok(c.iter().collect()))
                .collect();
            Ok(Box::new(chunks.into_iter()))
        }
    }

    fn add_registry() -> Arc<ToolRegistry> {
        let mut registry = ToolRegistry::new();
        registry
            .register_fn(
                ToolSpec::builder("add")
                    .required_param("a", ParamType::Number, "")
                    .required_param("b", ParamType::Number, "")
                    .build(),
                |args| {
                    let a = args["a"].as_f64().unwrap_or_default();
                    let b = args["b"].as_f64().unwrap_or_default();
                    Ok(json!(a + b))
                },
            )
            .unwrap();
        Arc::new(registry)
    }

    const ADD_ACTION: &str =
        "<action>{\"capability\": \"add\", \"input\": {\"a\": 2, \"b\": 3}, \"rationale\": \"sum\"}</action>";

    #[test]
    fn unavailable_backend_is_fatal_without_touching_conversation() {
        let mut agent = Agent::builder(ScriptedClient::unavailable(), add_registry()).build();
        let err = agent.process_query("add 2 and 3").unwrap_err();
        assert_eq!(err, AgentError::BackendUnavailable);
        assert!(agent.conversation().is_empty());
    }

    #[test]
    fn tool_then_answer_runs_two_model_turns() {
        let client = ScriptedClient::new(&[ADD_ACTION, "The sum is 5."]);
        let mut agent = Agent::builder(client, add_registry()).build();

        let answer = agent.process_query("what is 2 + 3?").unwrap();
        assert_eq!(answer, "The sum is 5.");

        // user query, assistant action, user observation, assistant answer
        let messages = agent.conversation().messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].role, Role::User);
        assert!(messages[2].content.starts_with("Observation: Tool 'add' returned: 5"));
    }

    #[test]
    fn stuck_model_exits_at_iteration_cap_with_best_effort_answer() {
        let client = ScriptedClient::new(&[ADD_ACTION]);
        let mut agent = Agent::builder(client, add_registry())
            .max_iterations(5)
            .build();

        let answer = agent.process_query("loop forever").unwrap();
        // Best effort: the last attempted action's input.
        assert_eq!(answer, json!({"a": 2, "b": 3}).to_string());

        // 1 query + 5 iterations * (assistant reply + observation).
        assert_eq!(agent.conversation().len(), 11);
    }

    #[test]
    fn tool_failure_becomes_observation_not_error() {
        let bad_action =
            "<action>{\"capability\": \"add\", \"input\": {\"a\": \"two\"}, \"rationale\": \"oops\"}</action>";
        let client = ScriptedClient::new(&[bad_action, "I could not add those."]);
        let mut agent = Agent::builder(client, add_registry()).build();

        let answer = agent.process_query("add").unwrap();
        assert_eq!(answer, "I could not add those.");

        let observation = &agent.conversation().messages()[2].content;
        assert!(observation.starts_with("Observation: Error executing tool 'add':"));
        assert!(observation.contains("missing required parameter 'b'"));
    }

    #[test]
    fn streaming_and_blocking_produce_the_same_answer() {
        let streamed = {
            let client = ScriptedClient::new(&[ADD_ACTION, "The sum is 5."]);
            let mut agent = Agent::builder(client, add_registry()).streaming(true).build();
            agent.process_query("what is 2 + 3?").unwrap()
        };
        let blocking = {
            let client = ScriptedClient::new(&[ADD_ACTION, "The sum is 5."]);
            let mut agent = Agent::builder(client, add_registry()).build();
            agent.process_query("what is 2 + 3?").unwrap()
        };
        assert_eq!(streamed, blocking);
    }

    #[test]
    fn conversation_persists_across_queries() {
        let client = ScriptedClient::new(&["First answer.", "Second answer."]);
        let mut agent = Agent::builder(client, add_registry()).build();

        agent.process_query("first").unwrap();
        let after_first = agent.conversation().len();
        agent.process_query("second").unwrap();
        assert!(agent.conversation().len() > after_first);
        assert_eq!(agent.conversation().messages()[0].content, "first");
    }
}
