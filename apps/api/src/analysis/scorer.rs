//! Similarity scoring — embeds two texts independently and compares them by
//! cosine similarity, reported as a percentage with two decimals.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::embedding::Embedder;
use crate::errors::AppError;

/// Outcome of one analysis, serialized as the success body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityResult {
    pub similarity_score: f64,
    pub message: String,
}

impl SimilarityResult {
    pub fn new(similarity_score: f64) -> Self {
        Self {
            similarity_score,
            message: format!(
                "The resume matches {}% with the job description.",
                format_score(similarity_score)
            ),
        }
    }
}

/// Renders a score the way it appears in the JSON body: whole numbers keep a
/// trailing `.0` so the message and `similarity_score` read identically.
pub fn format_score(score: f64) -> String {
    if score.is_finite() && score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        score.to_string()
    }
}

/// `dot(a, b) / (|a| * |b|)`. Zero-magnitude input yields 0.0 rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Cosine similarity scaled to a percentage and rounded to two decimals.
/// Negative similarity stays negative unless `clamp` is set.
pub fn to_percentage(similarity: f32, clamp: bool) -> f64 {
    let pct = (f64::from(similarity) * 100.0 * 100.0).round() / 100.0;
    if clamp {
        pct.clamp(0.0, 100.0)
    } else {
        pct
    }
}

/// Shared scorer. Cloning is cheap; all clones share the model and the
/// inference permits.
#[derive(Clone)]
pub struct SimilarityScorer {
    embedder: Arc<dyn Embedder>,
    permits: Arc<Semaphore>,
    clamp: bool,
}

impl SimilarityScorer {
    pub fn new(embedder: Arc<dyn Embedder>, max_concurrent: usize, clamp: bool) -> Self {
        Self {
            embedder,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            clamp,
        }
    }

    pub fn model_name(&self) -> &str {
        self.embedder.model_name()
    }

    /// Scores `text_a` against `text_b`. Encoding runs on the blocking pool
    /// once an inference permit is free.
    pub async fn score(&self, text_a: &str, text_b: &str) -> Result<f64, AppError> {
        let _permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        let embedder = Arc::clone(&self.embedder);
        let (a, b) = (text_a.to_owned(), text_b.to_owned());
        let similarity = tokio::task::spawn_blocking(move || {
            let va = embedder.embed(&a)?;
            let vb = embedder.embed(&b)?;
            Ok::<_, crate::embedding::EmbeddingError>(cosine_similarity(&va, &vb))
        })
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

        debug!("Cosine similarity {similarity}");
        Ok(to_percentage(similarity, self.clamp))
    }
}
