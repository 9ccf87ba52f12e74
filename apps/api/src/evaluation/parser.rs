//! Response parser. Pulls `Score: N/100` and `Feedback: ...` out of free-form model output.
//!
//! Pure and infallible: every input maps to a score, a feedback string, and an
//! explicit `ParseOutcome` describing what was (or was not) found.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const NO_FEEDBACK: &str = "No feedback available";

/// `Score:` marker, tolerating markdown bold around it.
static SCORE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\**\s*\bscore\s*\**\s*:\s*\**").expect("score marker regex"));
static SCORE_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bscore\s*\**\s*:\s*\**\s*(\d{1,3})\s*/\s*100\b").expect("score value regex")
});
static FEEDBACK_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\**\s*\bfeedback\s*\**\s*:\s*\**").expect("feedback marker regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseOutcome {
    /// Both score and feedback were found.
    Complete,
    /// No `Score:` marker at all.
    MissingScore,
    /// `Score:` present but not a valid `<0-100>/100` value.
    MalformedScore,
    /// Score found, feedback absent or empty.
    MissingFeedback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedResponse {
    pub score: u8,
    pub feedback: String,
    pub outcome: ParseOutcome,
}

pub fn parse_response(raw: &str) -> ParsedResponse {
    let score = extract_score(raw);
    let feedback = extract_feedback(raw);

    let outcome = match (&score, &feedback) {
        (ScoreExtraction::Missing, _) => ParseOutcome::MissingScore,
        (ScoreExtraction::Malformed, _) => ParseOutcome::MalformedScore,
        (ScoreExtraction::Found(_), None) => ParseOutcome::MissingFeedback,
        (ScoreExtraction::Found(_), Some(_)) => ParseOutcome::Complete,
    };

    ParsedResponse {
        score: match score {
            ScoreExtraction::Found(s) => s,
            _ => 0,
        },
        feedback: feedback.unwrap_or_else(|| NO_FEEDBACK.to_string()),
        outcome,
    }
}

enum ScoreExtraction {
    Found(u8),
    Missing,
    Malformed,
}

fn extract_score(raw: &str) -> ScoreExtraction {
    if let Some(value) = SCORE_VALUE_RE
        .captures(raw)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok())
    {
        if value <= 100 {
            return ScoreExtraction::Found(value);
        }
        return ScoreExtraction::Malformed;
    }

    if SCORE_MARKER_RE.is_match(raw) {
        ScoreExtraction::Malformed
    } else {
        ScoreExtraction::Missing
    }
}

/// Feedback runs from the first `Feedback:` marker to the next `Score:` marker or end of text.
fn extract_feedback(raw: &str) -> Option<String> {
    let start = FEEDBACK_MARKER_RE.find(raw)?.end();
    let rest = &raw[start..];
    let end = SCORE_MARKER_RE
        .find(rest)
        .map(|m| m.start())
        .unwrap_or(rest.len());

    let feedback = rest[..end].trim();
    (!feedback.is_empty()).then(|| feedback.to_string())
}
