use std::sync::Arc;

use crate::config::Config;
use crate::evaluation::orchestrator::Orchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; weights and criteria inside are read-only.
    pub orchestrator: Arc<Orchestrator>,
    pub config: Config,
}
