use crate::analysis::scorer::SimilarityScorer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Wraps the process-wide embedding model, loaded once at startup.
    pub scorer: SimilarityScorer,
    pub config: Config,
}
