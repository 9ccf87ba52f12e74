mod config;
mod errors;
mod evaluation;
mod llm_client;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::evaluation::dimension::{DimensionEvaluator, HeuristicEvaluator, LlmEvaluator};
use crate::evaluation::heuristics::HeuristicScorer;
use crate::evaluation::models::ScorerBackend;
use crate::evaluation::orchestrator::Orchestrator;
use crate::evaluation::suggestions::SuggestionGenerator;
use crate::llm_client::{Completion, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on invalid env values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Statement Reviewer v{}", env!("CARGO_PKG_VERSION"));

    let orchestrator = build_orchestrator(&config)?;
    info!(
        "Evaluator ready: backend={}, suggestions={}, weights={:?}",
        orchestrator.backend().label(),
        orchestrator.suggestions_enabled(),
        orchestrator.weights()
    );

    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wires the evaluator backend and suggestion generator selected by config.
fn build_orchestrator(config: &Config) -> Result<Orchestrator> {
    let llm: Option<Arc<dyn Completion>> = match (config.backend, &config.anthropic_api_key) {
        (ScorerBackend::Llm, Some(api_key)) => {
            let client = LlmClient::new(api_key.clone(), config.llm_max_attempts)
                .context("Failed to build LLM HTTP client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        _ => None,
    };

    let evaluator: Arc<dyn DimensionEvaluator> = match &llm {
        Some(llm) => Arc::new(LlmEvaluator::new(llm.clone())),
        None => Arc::new(HeuristicEvaluator::new(Arc::new(HeuristicScorer::default()))),
    };

    let suggestions = llm
        .filter(|_| config.enable_suggestions)
        .map(SuggestionGenerator::new);

    Ok(Orchestrator::new(
        evaluator,
        suggestions,
        config.weights,
        config.max_submission_chars,
    ))
}
