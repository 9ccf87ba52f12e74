// All LLM prompt constants for the Evaluation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Content rubric. Replace `{role_instruction}`, `{format_instruction}`, `{text}`.
pub const CONTENT_PROMPT_TEMPLATE: &str = r#"{role_instruction}

Evaluate the CONTENT of the personal statement below against this rubric:
1. Personal background — does the applicant show where they come from and how it shaped them?
2. Educational relevance — is their academic preparation relevant to the program?
3. Career-goal clarity — are short- and long-term goals concrete and believable?
4. Program-choice reasoning — do they explain why THIS program or school?
5. Uniqueness — what distinguishes this applicant from others with similar records?
6. Specific examples — are claims backed by concrete projects, results, or episodes?

{format_instruction}

PERSONAL STATEMENT:
{text}"#;

/// Narrative rubric. Replace `{role_instruction}`, `{format_instruction}`, `{text}`.
pub const NARRATIVE_PROMPT_TEMPLATE: &str = r#"{role_instruction}

Evaluate the NARRATIVE of the personal statement below against this rubric:
1. Opening engagement — does the first paragraph pull the reader in?
2. Coherence — do paragraphs connect logically with clear transitions?
3. Conflict resolution — is there a challenge and a credible account of how it was met?
4. Depth — does the applicant reflect on causes and lessons, not just events?
5. Closing impression — does the ending look forward and leave a clear final image?

{format_instruction}

PERSONAL STATEMENT:
{text}"#;

/// Language rubric. Replace `{role_instruction}`, `{format_instruction}`, `{text}`.
pub const LANGUAGE_PROMPT_TEMPLATE: &str = r#"{role_instruction}

Evaluate the LANGUAGE of the personal statement below against this rubric:
1. Grammar and mechanics — spelling, punctuation, agreement, tense.
2. Vocabulary — precise word choice; no filler ("very", "really", "things").
3. Sentence structure — varied length; no run-ons or fragments.
4. Academic tone — confident and formal without clichés or absolute claims.
5. Fluency — reads naturally, as a native-level academic writer would.

{format_instruction}

PERSONAL STATEMENT:
{text}"#;

/// Persona preamble for the suggestion call (sent as a system-role message).
pub const SUGGESTION_SYSTEM: &str = "You are an experienced graduate admissions consultant. \
    You give concrete, prioritized edits that an applicant can act on immediately. \
    You never rewrite the whole statement.";

/// Suggestion prompt. Replace `{dimension_summary}`, `{text}`.
pub const SUGGESTION_PROMPT_TEMPLATE: &str = r#"A personal statement was scored on three dimensions:

{dimension_summary}

Using these results, write a bulleted list of concrete improvements, most important first.
For each bullet:
- name the dimension it improves (Content, Narrative, or Language)
- point to the specific sentence or paragraph to change
- say exactly what to change and why

Keep the list to at most eight bullets.

PERSONAL STATEMENT:
{text}"#;
