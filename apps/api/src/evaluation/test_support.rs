//! In-memory generation capability for evaluator and orchestrator tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::evaluation::models::Dimension;
use crate::llm_client::{ChatMessage, Completion, LlmError};

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail,
}

impl Reply {
    pub fn text(s: &str) -> Self {
        Reply::Text(s.to_string())
    }

    fn into_result(self) -> Result<String, LlmError> {
        match self {
            Reply::Text(s) => Ok(s),
            Reply::Fail => Err(LlmError::Api {
                status: 503,
                message: "scripted failure".to_string(),
            }),
        }
    }
}

/// Answers each rubric prompt with a scripted reply, keyed by the dimension
/// the prompt asks about. Unscripted prompts fail.
#[derive(Default)]
pub struct ScriptedCompletion {
    dimensions: HashMap<Dimension, Reply>,
    suggestions: Option<Reply>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, dimension: Dimension, reply: Reply) -> Self {
        self.dimensions.insert(dimension, reply);
        self
    }

    pub fn on_suggestions(mut self, reply: Reply) -> Self {
        self.suggestions = Some(reply);
        self
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    fn reply_for(&self, prompt: &str) -> Option<Reply> {
        if prompt.contains("scored on three dimensions") {
            return self.suggestions.clone();
        }
        let dimension = if prompt.contains("Evaluate the CONTENT") {
            Dimension::Content
        } else if prompt.contains("Evaluate the NARRATIVE") {
            Dimension::Narrative
        } else if prompt.contains("Evaluate the LANGUAGE") {
            Dimension::Language
        } else {
            return None;
        };
        self.dimensions.get(&dimension).cloned()
    }
}

#[async_trait]
impl Completion for ScriptedCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(messages.to_vec());

        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        self.reply_for(&prompt)
            .unwrap_or(Reply::Fail)
            .into_result()
    }
}
