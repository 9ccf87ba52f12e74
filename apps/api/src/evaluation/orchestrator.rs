//! Evaluation orchestrator. Runs the full scoring pipeline for one submission.
//!
//! Flow: validate input, evaluate the three dimensions concurrently, take the
//! weighted composite, then optionally ask for suggestions.
//!
//! Each dimension evaluator is failure-isolated, so the only error a run can
//! return is an invalid submission. Dropping the returned future (client gone)
//! drops every in-flight outbound call with it.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::evaluation::dimension::DimensionEvaluator;
use crate::evaluation::models::{
    Dimension, EvaluationError, EvaluationInput, EvaluationResult, ScorerBackend, WeightTable,
};
use crate::evaluation::suggestions::SuggestionGenerator;

pub struct Orchestrator {
    evaluator: Arc<dyn DimensionEvaluator>,
    /// `None` when suggestions are disabled or there is no generation capability.
    suggestions: Option<SuggestionGenerator>,
    weights: WeightTable,
    max_submission_chars: usize,
}

impl Orchestrator {
    pub fn new(
        evaluator: Arc<dyn DimensionEvaluator>,
        suggestions: Option<SuggestionGenerator>,
        weights: WeightTable,
        max_submission_chars: usize,
    ) -> Self {
        Self {
            evaluator,
            suggestions,
            weights,
            max_submission_chars,
        }
    }

    pub fn weights(&self) -> WeightTable {
        self.weights
    }

    pub fn backend(&self) -> ScorerBackend {
        self.evaluator.backend()
    }

    pub fn suggestions_enabled(&self) -> bool {
        self.suggestions.is_some()
    }

    /// Runs one evaluation. `include_suggestions` can only narrow the
    /// process-wide setting, never enable suggestions it turned off.
    pub async fn run(
        &self,
        raw_text: &str,
        include_suggestions: bool,
    ) -> Result<EvaluationResult, EvaluationError> {
        let input = EvaluationInput::new(raw_text, self.max_submission_chars)?;
        let evaluation_id = Uuid::new_v4();
        let text = input.text();

        info!(
            "Evaluation {evaluation_id}: {} chars via {} backend",
            text.chars().count(),
            self.backend().label()
        );

        // Fan out: the three dimensions share nothing and run concurrently.
        let (content, narrative, language) = tokio::join!(
            self.evaluator.evaluate(Dimension::Content, text),
            self.evaluator.evaluate(Dimension::Narrative, text),
            self.evaluator.evaluate(Dimension::Language, text),
        );

        let final_score = self
            .weights
            .composite(content.score, narrative.score, language.score);

        info!(
            "Evaluation {evaluation_id}: content={} narrative={} language={} final={final_score}",
            content.score, narrative.score, language.score
        );

        let results = [content, narrative, language];

        // Fan in: suggestions need all three results.
        let suggestions = match &self.suggestions {
            Some(generator) if include_suggestions => {
                Some(generator.generate(text, &results).await)
            }
            _ => None,
        };

        let [content, narrative, language] = results;

        Ok(EvaluationResult {
            evaluation_id,
            submitted_at: input.submitted_at(),
            content,
            narrative,
            language,
            final_score,
            weights: self.weights,
            suggestions,
            scorer_backend: self.backend(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    use crate::evaluation::dimension::{HeuristicEvaluator, LlmEvaluator};
    use crate::evaluation::heuristics::HeuristicScorer;
    use crate::evaluation::models::DimensionResult;
    use crate::evaluation::suggestions::SUGGESTIONS_UNAVAILABLE;
    use crate::evaluation::test_support::{Reply, ScriptedCompletion};

    const MAX_CHARS: usize = 20_000;

    fn llm_orchestrator(llm: Arc<ScriptedCompletion>, with_suggestions: bool) -> Orchestrator {
        let suggestions = with_suggestions.then(|| SuggestionGenerator::new(llm.clone()));
        Orchestrator::new(
            Arc::new(LlmEvaluator::new(llm)),
            suggestions,
            WeightTable::default(),
            MAX_CHARS,
        )
    }

    fn healthy_llm() -> ScriptedCompletion {
        ScriptedCompletion::new()
            .on(Dimension::Content, Reply::text("Score: 70/100\nFeedback: Add examples."))
            .on(Dimension::Narrative, Reply::text("Score: 80/100\nFeedback: Clear arc."))
            .on(Dimension::Language, Reply::text("Score: 90/100\nFeedback: Fluent."))
            .on_suggestions(Reply::text("- Add a lab example."))
    }

    #[tokio::test]
    async fn test_full_run_aggregates_and_suggests() {
        let orchestrator = llm_orchestrator(Arc::new(healthy_llm()), true);

        let result = orchestrator.run("My personal statement.", true).await.unwrap();
        assert_eq!(result.content.score, 70);
        assert_eq!(result.narrative.score, 80);
        assert_eq!(result.language.score, 90);
        // 28 + 32 + 18
        assert_eq!(result.final_score, 78);
        assert_eq!(result.suggestions.as_deref(), Some("- Add a lab example."));
        assert_eq!(result.scorer_backend, ScorerBackend::Llm);
        assert_eq!(result.weights, WeightTable::default());
    }

    #[tokio::test]
    async fn test_content_failure_still_completes_run() {
        let llm = ScriptedCompletion::new()
            .on(Dimension::Content, Reply::Fail)
            .on(Dimension::Narrative, Reply::text("Score: 80/100\nFeedback: Clear arc."))
            .on(Dimension::Language, Reply::text("Score: 90/100\nFeedback: Fluent."))
            .on_suggestions(Reply::text("- Rework the content."));
        let orchestrator = llm_orchestrator(Arc::new(llm), true);

        let result = orchestrator.run("My personal statement.", true).await.unwrap();
        assert_eq!(result.content.score, 0);
        assert_eq!(
            result.content.feedback,
            "Error evaluating content. Please try again."
        );
        assert_eq!(result.narrative.score, 80);
        assert_eq!(result.language.score, 90);
        assert_eq!(result.final_score, 50);
        assert!(result.suggestions.is_some());
    }

    #[tokio::test]
    async fn test_total_failure_degrades_every_part() {
        let orchestrator = llm_orchestrator(Arc::new(ScriptedCompletion::new()), true);

        let result = orchestrator.run("My personal statement.", true).await.unwrap();
        for dimension in result.dimensions() {
            assert_eq!(dimension.score, 0);
        }
        assert_eq!(result.final_score, 0);
        assert_eq!(result.suggestions.as_deref(), Some(SUGGESTIONS_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_empty_submission_rejected_before_any_call() {
        let llm = Arc::new(healthy_llm());
        let orchestrator = llm_orchestrator(llm.clone(), true);

        let err = orchestrator.run("   \n  ", true).await.unwrap_err();
        assert_eq!(err, EvaluationError::EmptySubmission);
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_request_can_skip_suggestions() {
        let llm = Arc::new(healthy_llm());
        let orchestrator = llm_orchestrator(llm.clone(), true);

        let result = orchestrator.run("My personal statement.", false).await.unwrap();
        assert!(result.suggestions.is_none());
        assert_eq!(llm.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_request_cannot_enable_disabled_suggestions() {
        let llm = Arc::new(healthy_llm());
        let orchestrator = llm_orchestrator(llm.clone(), false);

        let result = orchestrator.run("My personal statement.", true).await.unwrap();
        assert!(result.suggestions.is_none());
        assert!(!orchestrator.suggestions_enabled());
    }

    #[tokio::test]
    async fn test_heuristic_backend_runs_without_llm() {
        let orchestrator = Orchestrator::new(
            Arc::new(HeuristicEvaluator::new(Arc::new(HeuristicScorer::default()))),
            None,
            WeightTable::default(),
            MAX_CHARS,
        );
        let text = "I grew up in a small town and studied engineering at my university. \
                    My career goal is to become a researcher.";

        let result = orchestrator.run(text, true).await.unwrap();
        assert_eq!(result.scorer_backend, ScorerBackend::Heuristic);
        assert!(result.content.score > 0);
        assert!(result.final_score <= 100);
        assert!(result.suggestions.is_none());
    }

    /// Sleeps before answering so the test can observe fan-out.
    struct SlowEvaluator;

    #[async_trait]
    impl DimensionEvaluator for SlowEvaluator {
        async fn evaluate(&self, dimension: Dimension, _text: &str) -> DimensionResult {
            tokio::time::sleep(Duration::from_secs(1)).await;
            DimensionResult::new(dimension, 50, "ok")
        }

        fn backend(&self) -> ScorerBackend {
            ScorerBackend::Llm
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dimensions_run_concurrently() {
        let orchestrator =
            Orchestrator::new(Arc::new(SlowEvaluator), None, WeightTable::default(), MAX_CHARS);

        let started = tokio::time::Instant::now();
        let result = orchestrator.run("Statement.", false).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(result.final_score, 50);
        assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
    }
}
