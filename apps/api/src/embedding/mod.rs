//! Embedding backends.
//!
//! `AppState` holds an `Arc<dyn Embedder>` built once at startup. The scorer
//! only ever talks to this trait, so tests swap in a deterministic embedder
//! without downloading a model.

pub mod local;

use thiserror::Error;

/// Model used by the production backend. Same model the service has always
/// scored with; changing it changes every score.
pub const MODEL_NAME: &str = "all-MiniLM-L6-v2";

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Embedding backend error: {0}")]
    Backend(String),

    #[error("Embedding backend returned no vector")]
    Empty,

    #[error("Embedding model lock poisoned")]
    Poisoned,
}

/// Encodes a single text into a dense vector. Implementations are blocking and
/// must be safe to call from several threads at once.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Name reported by `/health`.
    fn model_name(&self) -> &str;
}
