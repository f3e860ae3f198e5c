//! Local embedding backend on fastembed (ONNX Runtime, model files cached on disk).

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use crate::embedding::{Embedder, EmbeddingError, MODEL_NAME};

/// Holds the one loaded model for the process.
///
/// The ONNX session needs exclusive access for each inference call, so the
/// model sits behind a mutex. Concurrency is bounded one level up by the
/// scorer's semaphore.
pub struct LocalEmbedder {
    model: Mutex<TextEmbedding>,
}

impl LocalEmbedder {
    /// Loads (downloading on first run) the model into `cache_dir`. Blocking.
    pub fn load(cache_dir: PathBuf) -> Result<Self> {
        info!("Loading embedding model {MODEL_NAME} (cache: {})", cache_dir.display());

        let options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
            .with_cache_dir(cache_dir)
            .with_show_download_progress(false);
        let model = TextEmbedding::try_new(options)
            .map_err(|e| anyhow!("Failed to initialize embedding model {MODEL_NAME}: {e}"))?;

        info!("Embedding model {MODEL_NAME} ready");
        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Embedder for LocalEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut model = self.model.lock().map_err(|_| EmbeddingError::Poisoned)?;
        model
            .embed(vec![text], None)
            .map_err(|e| EmbeddingError::Backend(e.to_string()))?
            .into_iter()
            .next()
            .ok_or(EmbeddingError::Empty)
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }
}
