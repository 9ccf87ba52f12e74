// Personal statement evaluation pipeline.
// Implements: heuristic scoring, response parsing, per-dimension evaluation,
// weighted aggregation, and improvement suggestions.
// All LLM calls go through llm_client.

pub mod dimension;
pub mod handlers;
pub mod heuristics;
pub mod ingest;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod suggestions;

#[cfg(test)]
pub mod test_support;
