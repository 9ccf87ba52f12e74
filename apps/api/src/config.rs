use anyhow::{bail, Context, Result};

use crate::evaluation::models::{ScorerBackend, WeightTable};

/// Backoff doubles per retry, so attempts stay bounded.
pub const MAX_LLM_ATTEMPTS: u32 = 6;

/// Application configuration loaded from environment variables.
/// Startup fails if a present variable has an invalid value.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent key means heuristic backend only.
    pub anthropic_api_key: Option<String>,
    pub backend: ScorerBackend,
    pub enable_suggestions: bool,
    pub weights: WeightTable,
    pub llm_max_attempts: u32,
    pub max_submission_chars: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());

        let backend = match lookup("EVALUATION_BACKEND").as_deref().map(str::trim) {
            None | Some("") => {
                if anthropic_api_key.is_some() {
                    ScorerBackend::Llm
                } else {
                    ScorerBackend::Heuristic
                }
            }
            Some(v) if v.eq_ignore_ascii_case("llm") => {
                if anthropic_api_key.is_none() {
                    bail!("EVALUATION_BACKEND=llm requires ANTHROPIC_API_KEY to be set");
                }
                ScorerBackend::Llm
            }
            Some(v) if v.eq_ignore_ascii_case("heuristic") => ScorerBackend::Heuristic,
            Some(other) => bail!("EVALUATION_BACKEND must be 'llm' or 'heuristic', got '{other}'"),
        };

        let defaults = WeightTable::default();
        let weights = WeightTable::new(
            parse_or(&lookup, "WEIGHT_CONTENT", defaults.content)?,
            parse_or(&lookup, "WEIGHT_NARRATIVE", defaults.narrative)?,
            parse_or(&lookup, "WEIGHT_LANGUAGE", defaults.language)?,
        )
        .context("Invalid WEIGHT_* configuration")?;

        let llm_max_attempts = parse_or(&lookup, "LLM_MAX_ATTEMPTS", 3)?;
        if !(1..=MAX_LLM_ATTEMPTS).contains(&llm_max_attempts) {
            bail!(
                "LLM_MAX_ATTEMPTS must be between 1 and {MAX_LLM_ATTEMPTS}, got {llm_max_attempts}"
            );
        }

        Ok(Config {
            anthropic_api_key,
            backend,
            enable_suggestions: parse_or(&lookup, "ENABLE_SUGGESTIONS", true)?,
            weights,
            llm_max_attempts,
            max_submission_chars: parse_or(&lookup, "MAX_SUBMISSION_CHARS", 20_000)?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_key_use_heuristics() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.backend, ScorerBackend::Heuristic);
        assert!(config.anthropic_api_key.is_none());
        assert_eq!(config.weights, WeightTable::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.llm_max_attempts, 3);
        assert!(config.enable_suggestions);
    }

    #[test]
    fn test_key_defaults_to_llm_backend() {
        let config = config_from(&[("ANTHROPIC_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.backend, ScorerBackend::Llm);
    }

    #[test]
    fn test_explicit_heuristic_backend_with_key() {
        let config = config_from(&[
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("EVALUATION_BACKEND", "Heuristic"),
        ])
        .unwrap();
        assert_eq!(config.backend, ScorerBackend::Heuristic);
    }

    #[test]
    fn test_llm_backend_without_key_fails() {
        assert!(config_from(&[("EVALUATION_BACKEND", "llm")]).is_err());
    }

    #[test]
    fn test_unknown_backend_fails() {
        assert!(config_from(&[("EVALUATION_BACKEND", "gpt")]).is_err());
    }

    #[test]
    fn test_weight_overrides_validated() {
        let config = config_from(&[
            ("WEIGHT_CONTENT", "0.5"),
            ("WEIGHT_NARRATIVE", "0.3"),
            ("WEIGHT_LANGUAGE", "0.2"),
        ])
        .unwrap();
        assert_eq!(config.weights.content, 0.5);

        assert!(config_from(&[("WEIGHT_CONTENT", "0.9")]).is_err());
    }

    #[test]
    fn test_llm_max_attempts_bounded() {
        let config = config_from(&[("LLM_MAX_ATTEMPTS", "6")]).unwrap();
        assert_eq!(config.llm_max_attempts, 6);

        assert!(config_from(&[("LLM_MAX_ATTEMPTS", "0")]).is_err());
        assert!(config_from(&[("LLM_MAX_ATTEMPTS", "20")]).is_err());
    }

    #[test]
    fn test_invalid_number_fails() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("ENABLE_SUGGESTIONS", "maybe")]).is_err());
    }
}
