//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::analysis::analyze;
use crate::analysis::form::AnalyzeForm;
use crate::analysis::scorer::SimilarityResult;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /analyze
///
/// Scores a resume (uploaded file or `resume_text`) against `job_description`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    form: AnalyzeForm,
) -> Result<Json<SimilarityResult>, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "analyze",
        %request_id,
        upload = form.resume.is_some(),
    );

    let result = analyze(form, &state.scorer, &state.config.upload_dir, request_id)
        .instrument(span)
        .await?;

    Ok(Json(result))
}
