//! Ollama HTTP backend.
//!
//! Blocking client for a local Ollama instance: `/api/version` as the
//! availability probe, `/api/chat` for both plain and streamed chat. The
//! streamed variant consumes Ollama's NDJSON reply line by line and ends
//! when the backend reports `done`.

use std::io::{BufRead, BufReader, Lines};
use std::time::Duration;

use serde_json::{Value, json};
use waypoint_core::ChatMessage;

use crate::llm::{ChunkIter, ModelClient, ModelError};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.2:latest";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the Ollama chat API.
pub struct OllamaClient {
    base_url: String,
    model: String,
    http: reqwest::blocking::Client,
}

impl OllamaClient {
    /// Client for a local Ollama with the default model.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }

    pub fn with_config(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into(),
            model: model.into(),
            http,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn post_chat(&self, messages: &[ChatMessage], stream: bool) -> Result<reqwest::blocking::Response, ModelError> {
        let payload = json!({
            "model": self.model,
            "messages": messages,
            "stream": stream,
        });
        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&payload)
            .send()
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ModelError::Unreachable(e.to_string())
                } else {
                    ModelError::Request(e.to_string())
                }
            })?;
        response
            .error_for_status()
            .map_err(|e| ModelError::Request(e.to_string()))
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelClient for OllamaClient {
    fn is_available(&self) -> bool {
        self.http
            .get(format!("{}/api/version", self.base_url))
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn chat(&self, messages: &[ChatMessage]) -> Result<String, ModelError> {
        let response = self.post_chat(messages, false)?;
        let body: Value = response
            .json()
            .map_err(|e| ModelError::Malformed(e.to_string()))?;
        body["message"]["content"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| ModelError::Malformed("response carries no message content".into()))
    }

    fn stream_chat(&self, messages: &[ChatMessage]) -> Result<ChunkIter<'_>, ModelError> {
        let response = self.post_chat(messages, true)?;
        Ok(Box::new(NdjsonChunks {
            lines: BufReader::new(response).lines(),
            done: false,
        }))
    }
}

/// Iterator over the content fragments of an NDJSON chat stream.
struct NdjsonChunks {
    lines: Lines<BufReader<reqwest::blocking::Response>>,
    done: bool,
}

impl Iterator for NdjsonChunks {
    type Item = Result<String, ModelError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(ModelError::Request(e.to_string())));
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let chunk: Value = match serde_json::from_str(&line) {
                Ok(chunk) => chunk,
                Err(e) => {
                    self.done = true;
                    return Some(Err(ModelError::Malformed(e.to_string())));
                }
            };
            if chunk["done"].as_bool().unwrap_or(false) {
                self.done = true;
            }
            let content = chunk["message"]["content"].as_str().unwrap_or_default();
            if !content.is_empty() {
                return Some(Ok(content.to_owned()));
            }
            if self.done {
                return None;
            }
        }
    }
}
