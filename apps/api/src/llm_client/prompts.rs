// Shared prompt fragments.
// Each module that makes LLM calls keeps its own prompts.rs alongside it.
// This file contains cross-cutting fragments only.

/// Output convention every rubric prompt ends with. The response parser
/// depends on these two markers.
pub const SCORE_FORMAT_INSTRUCTION: &str = "\
    Respond in exactly this format and nothing else:\n\
    Score: <integer from 0 to 100>/100\n\
    Feedback: <two to four sentences of specific, actionable feedback>";

/// Guard against the model rewriting the applicant's statement instead of judging it.
pub const EVALUATOR_ROLE_INSTRUCTION: &str = "\
    You are evaluating a graduate school personal statement. \
    Judge only the text provided. Do NOT rewrite it. \
    Do NOT invent details about the applicant.";
