#![allow(dead_code)]

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Tolerance for the weights-sum-to-one check.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Error, PartialEq)]
pub enum EvaluationError {
    #[error("nothing to evaluate: submission is empty")]
    EmptySubmission,

    #[error("submission too long: {length} characters (max {max})")]
    SubmissionTooLong { length: usize, max: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum WeightError {
    #[error("{dimension} weight must be in (0, 1], got {value}")]
    OutOfRange { dimension: Dimension, value: f64 },

    #[error("weights must sum to 1.0, got {0}")]
    BadSum(f64),
}

/// An independent axis of evaluation with its own weight and rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Content,
    Narrative,
    Language,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Content, Dimension::Narrative, Dimension::Language];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Content => "content",
            Dimension::Narrative => "narrative",
            Dimension::Language => "language",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated submission. Text is trimmed and never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationInput {
    text: String,
    submitted_at: DateTime<Utc>,
}

impl EvaluationInput {
    pub fn new(raw: &str, max_chars: usize) -> Result<Self, EvaluationError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(EvaluationError::EmptySubmission);
        }
        let length = text.chars().count();
        if length > max_chars {
            return Err(EvaluationError::SubmissionTooLong {
                length,
                max: max_chars,
            });
        }
        Ok(Self {
            text: text.to_string(),
            submitted_at: Utc::now(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionResult {
    pub dimension: Dimension,
    pub score: u8, // 0 – 100
    pub feedback: String,
}

impl DimensionResult {
    pub fn new(dimension: Dimension, score: u32, feedback: impl Into<String>) -> Self {
        Self {
            dimension,
            score: score.min(100) as u8,
            feedback: feedback.into(),
        }
    }

    /// Degraded result used when the generation call for a dimension fails.
    pub fn failed(dimension: Dimension) -> Self {
        Self::new(
            dimension,
            0,
            format!("Error evaluating {dimension}. Please try again."),
        )
    }
}

/// Per-dimension weights. Constructed once at startup and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    pub content: f64,
    pub narrative: f64,
    pub language: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            content: 0.4,
            narrative: 0.4,
            language: 0.2,
        }
    }
}

impl WeightTable {
    pub fn new(content: f64, narrative: f64, language: f64) -> Result<Self, WeightError> {
        let table = Self {
            content,
            narrative,
            language,
        };

        for dimension in Dimension::ALL {
            let value = table.weight(dimension);
            if !(value > 0.0 && value <= 1.0) {
                return Err(WeightError::OutOfRange { dimension, value });
            }
        }

        let sum = content + narrative + language;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightError::BadSum(sum));
        }

        Ok(table)
    }

    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Content => self.content,
            Dimension::Narrative => self.narrative,
            Dimension::Language => self.language,
        }
    }

    /// Weighted sum of the three scores, rounded half-up once at the end.
    pub fn composite(&self, content: u8, narrative: u8, language: u8) -> u8 {
        let weighted = f64::from(content) * self.content
            + f64::from(narrative) * self.narrative
            + f64::from(language) * self.language;
        // Snap float noise (e.g. 62.49999999) before the half-up rounding.
        let snapped = (weighted * 1e6).round() / 1e6;
        (snapped + 0.5).floor().clamp(0.0, 100.0) as u8
    }
}

/// Which backend produced the dimension scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerBackend {
    Llm,
    Heuristic,
}

impl ScorerBackend {
    pub fn label(&self) -> &'static str {
        match self {
            ScorerBackend::Llm => "llm",
            ScorerBackend::Heuristic => "heuristic",
        }
    }
}

/// Terminal artifact of one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub evaluation_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub content: DimensionResult,
    pub narrative: DimensionResult,
    pub language: DimensionResult,
    pub final_score: u8, // 0 – 100
    pub weights: WeightTable,
    pub suggestions: Option<String>,
    pub scorer_backend: ScorerBackend,
}

impl EvaluationResult {
    pub fn dimensions(&self) -> [&DimensionResult; 3] {
        [&self.content, &self.narrative, &self.language]
    }
}
