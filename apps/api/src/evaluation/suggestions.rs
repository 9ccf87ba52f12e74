//! Suggestion generator: one consolidated LLM call turning the three dimension
//! results into a prioritized list of edits.
//!
//! The reply is returned verbatim; markup normalization belongs to the client.

use std::sync::Arc;

use tracing::{info, warn};

use crate::evaluation::models::DimensionResult;
use crate::evaluation::prompts::{SUGGESTION_PROMPT_TEMPLATE, SUGGESTION_SYSTEM};
use crate::llm_client::{ChatMessage, Completion};

pub const SUGGESTIONS_UNAVAILABLE: &str = "Unable to generate suggestions at this time.";

pub struct SuggestionGenerator {
    llm: Arc<dyn Completion>,
}

impl SuggestionGenerator {
    pub fn new(llm: Arc<dyn Completion>) -> Self {
        Self { llm }
    }

    pub async fn generate(&self, text: &str, results: &[DimensionResult]) -> String {
        let messages = [
            ChatMessage::system(SUGGESTION_SYSTEM),
            ChatMessage::user(build_suggestion_prompt(text, results)),
        ];

        match self.llm.complete(&messages).await {
            Ok(suggestions) if !suggestions.trim().is_empty() => {
                info!("Generated {} chars of suggestions", suggestions.len());
                suggestions
            }
            Ok(_) => {
                warn!("Suggestion call returned blank text");
                SUGGESTIONS_UNAVAILABLE.to_string()
            }
            Err(e) => {
                warn!("Suggestion generation failed: {e}");
                SUGGESTIONS_UNAVAILABLE.to_string()
            }
        }
    }
}

fn build_suggestion_prompt(text: &str, results: &[DimensionResult]) -> String {
    let dimension_summary = results
        .iter()
        .map(|r| {
            format!(
                "- {} ({}/100): {}",
                capitalize(r.dimension.label()),
                r.score,
                r.feedback
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    SUGGESTION_PROMPT_TEMPLATE
        .replace("{dimension_summary}", &dimension_summary)
        .replace("{text}", text)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
