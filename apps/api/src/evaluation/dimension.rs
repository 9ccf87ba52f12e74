//! Dimension evaluators: pluggable, trait-based scoring of a single dimension.
//!
//! `LlmEvaluator` sends a rubric prompt to the generation capability and parses
//! the reply. `HeuristicEvaluator` runs the lexical scorer with no outbound call.
//! Both return a `DimensionResult` and never fail: an LLM error degrades to a
//! zero score for that dimension only.
//!
//! The orchestrator holds an `Arc<dyn DimensionEvaluator>`, chosen at startup via config.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::evaluation::heuristics::HeuristicScorer;
use crate::evaluation::models::{Dimension, DimensionResult, ScorerBackend};
use crate::evaluation::parser::{parse_response, ParseOutcome};
use crate::evaluation::prompts::{
    CONTENT_PROMPT_TEMPLATE, LANGUAGE_PROMPT_TEMPLATE, NARRATIVE_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{EVALUATOR_ROLE_INSTRUCTION, SCORE_FORMAT_INSTRUCTION};
use crate::llm_client::{ChatMessage, Completion};

#[async_trait]
pub trait DimensionEvaluator: Send + Sync {
    async fn evaluate(&self, dimension: Dimension, text: &str) -> DimensionResult;

    fn backend(&self) -> ScorerBackend;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmEvaluator
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmEvaluator {
    llm: Arc<dyn Completion>,
}

impl LlmEvaluator {
    pub fn new(llm: Arc<dyn Completion>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl DimensionEvaluator for LlmEvaluator {
    async fn evaluate(&self, dimension: Dimension, text: &str) -> DimensionResult {
        let messages = [ChatMessage::user(build_rubric_prompt(dimension, text))];

        let raw = match self.llm.complete(&messages).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Evaluation of {dimension} failed, degrading to zero: {e}");
                return DimensionResult::failed(dimension);
            }
        };

        let parsed = parse_response(&raw);
        if parsed.outcome != ParseOutcome::Complete {
            warn!(
                "Unexpected {dimension} response format ({:?}): {:?}",
                parsed.outcome,
                raw.chars().take(80).collect::<String>()
            );
        }
        debug!("{dimension} scored {}/100", parsed.score);

        DimensionResult::new(dimension, parsed.score.into(), parsed.feedback)
    }

    fn backend(&self) -> ScorerBackend {
        ScorerBackend::Llm
    }
}

/// Fills the dimension's rubric template with the shared instructions and the statement.
pub fn build_rubric_prompt(dimension: Dimension, text: &str) -> String {
    let template = match dimension {
        Dimension::Content => CONTENT_PROMPT_TEMPLATE,
        Dimension::Narrative => NARRATIVE_PROMPT_TEMPLATE,
        Dimension::Language => LANGUAGE_PROMPT_TEMPLATE,
    };

    template
        .replace("{role_instruction}", EVALUATOR_ROLE_INSTRUCTION)
        .replace("{format_instruction}", SCORE_FORMAT_INSTRUCTION)
        .replace("{text}", text)
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicEvaluator
// ────────────────────────────────────────────────────────────────────────────

/// Runs entirely on the lexical scorer. Fast, deterministic, no LLM call.
pub struct HeuristicEvaluator {
    scorer: Arc<HeuristicScorer>,
}

impl HeuristicEvaluator {
    pub fn new(scorer: Arc<HeuristicScorer>) -> Self {
        Self { scorer }
    }
}

#[async_trait]
impl DimensionEvaluator for HeuristicEvaluator {
    async fn evaluate(&self, dimension: Dimension, text: &str) -> DimensionResult {
        self.scorer.evaluate(dimension, text)
    }

    fn backend(&self) -> ScorerBackend {
        ScorerBackend::Heuristic
    }
}
