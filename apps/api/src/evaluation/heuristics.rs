#![allow(dead_code)]

//! Lexical heuristic scorer. Deterministic keyword/pattern scoring, no LLM call.
//!
//! Content and Narrative are scored from named criteria, each worth 0–5 points:
//! a criterion reaches 5 once half of its keyword list appears in the text.
//! Language is scored from sentence-level red flags: a sentence needs
//! modification when two or more independent flags fire.
//!
//! The criteria tables are built once at startup inside `HeuristicScorer` and
//! shared read-only behind an `Arc`.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::evaluation::models::{Dimension, DimensionResult};

/// Flags needed before a sentence counts as needing modification.
const RED_FLAG_THRESHOLD: usize = 2;
const LONG_SENTENCE_CHARS: usize = 50;
const SHORT_SENTENCE_CHARS: usize = 10;
/// Flagged sentences quoted back in language feedback.
const MAX_QUOTED_SENTENCES: usize = 3;
/// Criterion score at or above which a criterion counts as covered.
const COVERED_CRITERION_SCORE: u8 = 4;

static SENTENCE_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence boundary regex"));
static PARAGRAPH_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph break regex"));
static VAGUE_LANGUAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(very|really|things|stuff|a lot|basically|kind of|sort of|somewhat)\b")
        .expect("vague language regex")
});
static CLICHE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(am|is|are|was|were)\s+(passionate|interested|excited)\s+(about|in)\b")
        .expect("cliche regex")
});
static ABSOLUTE_QUANTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(always|never|all|none|every|everyone)\b").expect("absolute quantifier regex")
});

// ────────────────────────────────────────────────────────────────────────────
// Criterion tables
// ────────────────────────────────────────────────────────────────────────────

const PERSONAL_BACKGROUND: &[&str] = &[
    "grew up", "family", "childhood", "hometown", "town", "parents", "background", "community",
];
const EDUCATIONAL_EXPERIENCE: &[&str] = &[
    "studied", "university", "degree", "major", "coursework", "engineering", "college", "academic",
];
const CAREER_GOALS: &[&str] = &[
    "career", "goal", "future", "aspire", "become", "profession", "ambition", "researcher",
];
const PROGRAM_CHOICE: &[&str] = &[
    "program", "chose", "faculty", "curriculum", "professor", "reputation", "department",
    "opportunity",
];
const UNIQUENESS: &[&str] = &[
    "unique", "unlike", "distinctive", "perspective", "different", "unusual", "stand out",
    "diverse",
];
const SPECIFIC_EXAMPLES: &[&str] = &[
    "for example", "for instance", "specific", "specifically", "project", "built", "developed",
    "achieved",
];

const STRONG_OPENING: &[&str] = &[
    "when", "moment", "remember", "imagine", "first time", "never forget", "ever since", "day",
];
const COHERENT_STRUCTURE: &[&str] = &[
    "however", "therefore", "furthermore", "moreover", "additionally", "consequently", "finally",
    "in addition", "as a result", "meanwhile",
];
const CONFLICT_RESOLUTION: &[&str] = &[
    "challenge", "struggle", "obstacle", "difficult", "overcame", "failure", "problem", "solved",
    "learned", "despite",
];
const NARRATIVE_DEPTH: &[&str] = &[
    "because", "which led", "as a result", "realized", "so that", "this taught", "reflect",
    "understood",
];
const STRONG_CLOSING: &[&str] = &[
    "future", "contribute", "look forward", "hope", "ready", "believe", "goal", "forward",
];

/// Which part of the text a criterion is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    WholeText,
    FirstParagraph,
    LastParagraph,
}

/// Case-insensitive whole-word matchers for a distinct keyword set.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    patterns: Vec<Regex>,
}

impl KeywordSet {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let mut seen = HashSet::new();
        let patterns = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty() && seen.insert(k.clone()))
            .filter_map(|k| match keyword_pattern(&k) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Skipping unusable keyword {k:?}: {e}");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of distinct keywords present in `text`.
    pub fn count_matches(&self, text: &str) -> usize {
        self.patterns.iter().filter(|re| re.is_match(text)).count()
    }

    pub fn score(&self, text: &str) -> u8 {
        criterion_points(self.count_matches(text), self.len())
    }
}

/// Multi-word keywords tolerate any whitespace between their words.
/// `\b` only applies next to a word character, so edges like the `+` in
/// `c++` are bounded by a non-word character or the end of the text instead.
fn keyword_pattern(keyword: &str) -> Result<Regex, regex::Error> {
    let body = keyword
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let start = match keyword.chars().next() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?:^|[^\w])",
    };
    let end = match keyword.chars().last() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?:[^\w]|$)",
    };
    Regex::new(&format!(r"(?i){start}{body}{end}"))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `min(5, ceil(matches * 5 / ceil(total / 2)))`; an empty keyword set scores 0.
pub fn criterion_points(matches: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let half = total.div_ceil(2);
    (matches * 5).div_ceil(half).min(5) as u8
}

/// Scores `text` against an ad-hoc keyword set. Returns 0–5.
pub fn score_criterion<S: AsRef<str>>(text: &str, keywords: &[S]) -> u8 {
    KeywordSet::new(keywords).score(text)
}

/// A named heuristic check contributing up to 5 points.
#[derive(Debug, Clone)]
pub struct Criterion {
    pub name: &'static str,
    pub scope: Scope,
    keywords: KeywordSet,
}

impl Criterion {
    pub fn new(name: &'static str, scope: Scope, keywords: &[&str]) -> Self {
        Self {
            name,
            scope,
            keywords: KeywordSet::new(keywords),
        }
    }

    pub fn score(&self, text: &str) -> u8 {
        let target = match self.scope {
            Scope::WholeText => text,
            Scope::FirstParagraph => first_paragraph(text),
            Scope::LastParagraph => last_paragraph(text),
        };
        self.keywords.score(target)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CriterionScore {
    pub name: &'static str,
    pub score: u8, // 0 – 5
}

#[derive(Debug, Clone, Serialize)]
pub struct CriteriaReport {
    pub criteria: Vec<CriterionScore>,
    pub score: u8, // 0 – 100
}

// ────────────────────────────────────────────────────────────────────────────
// Language red flags
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlag {
    TooLong,
    TooShort,
    VagueLanguage,
    Cliche,
    AbsoluteQuantifier,
}

impl RedFlag {
    pub fn label(&self) -> &'static str {
        match self {
            RedFlag::TooLong => "too long",
            RedFlag::TooShort => "too short",
            RedFlag::VagueLanguage => "vague language",
            RedFlag::Cliche => "cliché",
            RedFlag::AbsoluteQuantifier => "absolute claim",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlaggedSentence {
    pub sentence: String,
    pub flags: Vec<RedFlag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageReport {
    pub sentence_count: usize,
    pub flagged: Vec<FlaggedSentence>,
    pub band: u8,  // 1 – 5
    pub score: u8, // 0 – 100
}

impl LanguageReport {
    pub fn flagged_ratio(&self) -> f64 {
        if self.sentence_count == 0 {
            0.0
        } else {
            self.flagged.len() as f64 / self.sentence_count as f64
        }
    }
}

/// Splits on runs of `.`, `!`, `?` and drops empty fragments.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BOUNDARY_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Paragraphs are separated by blank lines.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK_RE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn first_paragraph(text: &str) -> &str {
    split_paragraphs(text).first().copied().unwrap_or("")
}

fn last_paragraph(text: &str) -> &str {
    split_paragraphs(text).last().copied().unwrap_or("")
}

pub fn red_flags(sentence: &str) -> Vec<RedFlag> {
    let sentence = sentence.trim();
    let length = sentence.chars().count();
    let mut flags = Vec::new();

    if length > LONG_SENTENCE_CHARS {
        flags.push(RedFlag::TooLong);
    }
    if length < SHORT_SENTENCE_CHARS {
        flags.push(RedFlag::TooShort);
    }
    if VAGUE_LANGUAGE_RE.is_match(sentence) {
        flags.push(RedFlag::VagueLanguage);
    }
    if CLICHE_RE.is_match(sentence) {
        flags.push(RedFlag::Cliche);
    }
    if ABSOLUTE_QUANTIFIER_RE.is_match(sentence) {
        flags.push(RedFlag::AbsoluteQuantifier);
    }
    flags
}

pub fn needs_modification(sentence: &str) -> bool {
    red_flags(sentence).len() >= RED_FLAG_THRESHOLD
}

/// Step function over the flagged-sentence fraction.
fn language_band(flagged_ratio: f64) -> u8 {
    match flagged_ratio {
        r if r <= 0.05 => 5,
        r if r <= 0.10 => 4,
        r if r <= 0.20 => 3,
        r if r <= 0.30 => 2,
        _ => 1,
    }
}

pub fn score_language(text: &str) -> LanguageReport {
    let sentences = split_sentences(text);
    let flagged: Vec<FlaggedSentence> = sentences
        .iter()
        .filter_map(|s| {
            let flags = red_flags(s);
            (flags.len() >= RED_FLAG_THRESHOLD).then(|| FlaggedSentence {
                sentence: s.to_string(),
                flags,
            })
        })
        .collect();

    let mut report = LanguageReport {
        sentence_count: sentences.len(),
        flagged,
        band: 5,
        score: 100,
    };
    report.band = language_band(report.flagged_ratio());
    report.score = report.band * 20;
    report
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicScorer
// ────────────────────────────────────────────────────────────────────────────

/// Immutable criteria tables for the Content and Narrative dimensions.
#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    content: Vec<Criterion>,
    narrative: Vec<Criterion>,
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self {
            content: vec![
                Criterion::new("personal background", Scope::WholeText, PERSONAL_BACKGROUND),
                Criterion::new("educational experience", Scope::WholeText, EDUCATIONAL_EXPERIENCE),
                Criterion::new("career goals", Scope::WholeText, CAREER_GOALS),
                Criterion::new("program choice", Scope::WholeText, PROGRAM_CHOICE),
                Criterion::new("uniqueness", Scope::WholeText, UNIQUENESS),
                Criterion::new("specific examples", Scope::WholeText, SPECIFIC_EXAMPLES),
            ],
            narrative: vec![
                Criterion::new("strong opening", Scope::FirstParagraph, STRONG_OPENING),
                Criterion::new("coherent structure", Scope::WholeText, COHERENT_STRUCTURE),
                Criterion::new("conflict and resolution", Scope::WholeText, CONFLICT_RESOLUTION),
                Criterion::new("narrative depth", Scope::WholeText, NARRATIVE_DEPTH),
                Criterion::new("strong closing", Scope::LastParagraph, STRONG_CLOSING),
            ],
        }
    }
}

impl HeuristicScorer {
    pub fn score_content(&self, text: &str) -> CriteriaReport {
        score_criteria(&self.content, text)
    }

    pub fn score_narrative(&self, text: &str) -> CriteriaReport {
        score_criteria(&self.narrative, text)
    }

    pub fn evaluate(&self, dimension: Dimension, text: &str) -> DimensionResult {
        match dimension {
            Dimension::Content => {
                let report = self.score_content(text);
                DimensionResult::new(
                    dimension,
                    report.score.into(),
                    criteria_feedback(dimension, &report),
                )
            }
            Dimension::Narrative => {
                let report = self.score_narrative(text);
                DimensionResult::new(
                    dimension,
                    report.score.into(),
                    criteria_feedback(dimension, &report),
                )
            }
            Dimension::Language => {
                let report = score_language(text);
                DimensionResult::new(dimension, report.score.into(), language_feedback(&report))
            }
        }
    }
}

/// `round(sum / (N * 5) * 100)`
fn score_criteria(criteria: &[Criterion], text: &str) -> CriteriaReport {
    let scores: Vec<CriterionScore> = criteria
        .iter()
        .map(|c| CriterionScore {
            name: c.name,
            score: c.score(text),
        })
        .collect();

    let max = scores.len() * 5;
    let total: usize = scores.iter().map(|s| s.score as usize).sum();
    let score = if max == 0 {
        0
    } else {
        (total as f64 / max as f64 * 100.0).round() as u8
    };

    CriteriaReport {
        criteria: scores,
        score,
    }
}

fn criteria_feedback(dimension: Dimension, report: &CriteriaReport) -> String {
    let (covered, weak): (Vec<&CriterionScore>, Vec<&CriterionScore>) = report
        .criteria
        .iter()
        .partition(|c| c.score >= COVERED_CRITERION_SCORE);

    if weak.is_empty() {
        return format!("Heuristic {dimension} check: every criterion is well covered.");
    }

    let weak_list = weak
        .iter()
        .map(|c| format!("{} ({}/5)", c.name, c.score))
        .collect::<Vec<_>>()
        .join(", ");

    if covered.is_empty() {
        format!("Heuristic {dimension} check: develop {weak_list}.")
    } else {
        let covered_list = covered.iter().map(|c| c.name).collect::<Vec<_>>().join(", ");
        format!("Heuristic {dimension} check: strong on {covered_list}. Develop {weak_list}.")
    }
}

fn language_feedback(report: &LanguageReport) -> String {
    if report.sentence_count == 0 {
        return "No complete sentences found to assess.".to_string();
    }
    if report.flagged.is_empty() {
        return format!(
            "All {} sentences read cleanly; no sentence-level red flags found.",
            report.sentence_count
        );
    }

    let examples = report
        .flagged
        .iter()
        .take(MAX_QUOTED_SENTENCES)
        .map(|f| {
            let flags = f.flags.iter().map(RedFlag::label).collect::<Vec<_>>().join(", ");
            format!("\"{}\" ({flags})", f.sentence)
        })
        .collect::<Vec<_>>()
        .join("; ");

    format!(
        "{} of {} sentences need revision ({:.0}%). Examples: {examples}.",
        report.flagged.len(),
        report.sentence_count,
        report.flagged_ratio() * 100.0
    )
}
