// Resume analysis pipeline.
// resolve resume text → resolve job text → validate → score → respond.
// Only the embedding model outlives a request; uploads are staged and removed per request.

pub mod form;
pub mod handlers;
pub mod scorer;
pub mod upload;

use std::path::Path;

use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::form::AnalyzeForm;
use crate::analysis::scorer::{SimilarityResult, SimilarityScorer};
use crate::analysis::upload::{extract_upload, UploadedDocument};
use crate::errors::AppError;

/// Runs one analysis end to end.
pub async fn analyze(
    form: AnalyzeForm,
    scorer: &SimilarityScorer,
    upload_dir: &Path,
    request_id: Uuid,
) -> Result<SimilarityResult, AppError> {
    let resume_text =
        resolve_resume_text(form.resume, form.resume_text, upload_dir, request_id).await?;
    let job_text = form
        .job_description
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    validate(&resume_text, job_text)?;

    let score = scorer.score(&resume_text, job_text).await?;
    info!(score, "Resume scored against job description");
    Ok(SimilarityResult::new(score))
}

/// An uploaded file wins over inline text. Extracted text is used as-is;
/// inline text is trimmed. Neither present yields an empty string.
async fn resolve_resume_text(
    upload: Option<UploadedDocument>,
    inline: Option<String>,
    upload_dir: &Path,
    request_id: Uuid,
) -> Result<String, AppError> {
    match (upload, inline) {
        (Some(upload), _) => extract_upload(upload, upload_dir.to_path_buf(), request_id).await,
        (None, Some(text)) => {
            debug!("Using inline resume text");
            Ok(text.trim().to_owned())
        }
        (None, None) => Ok(String::new()),
    }
}

/// Resume is checked first; only the first failure is reported.
fn validate(resume_text: &str, job_text: &str) -> Result<(), AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::MissingResume);
    }
    if job_text.is_empty() {
        return Err(AppError::MissingJobDescription);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::KeywordEmbedder;
    use crate::extract::ExtractError;
    use bytes::Bytes;
    use std::sync::Arc;

    fn scorer() -> SimilarityScorer {
        SimilarityScorer::new(Arc::new(KeywordEmbedder), 2, false)
    }

    fn text_form(resume: Option<&str>, jd: Option<&str>) -> AnalyzeForm {
        AnalyzeForm {
            resume: None,
            resume_text: resume.map(str::to_owned),
            job_description: jd.map(str::to_owned),
        }
    }

    #[test]
    fn test_validate_reports_resume_first() {
        assert!(matches!(validate("", ""), Err(AppError::MissingResume)));
        assert!(matches!(
            validate("resume", ""),
            Err(AppError::MissingJobDescription)
        ));
        assert!(validate("resume", "jd").is_ok());
    }

    #[test]
    fn test_validate_rejects_whitespace_only_resume() {
        assert!(matches!(
            validate(" \n\t", "jd"),
            Err(AppError::MissingResume)
        ));
    }

    #[tokio::test]
    async fn test_inline_text_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let text = resolve_resume_text(None, Some("  Rust dev \n".into()), dir.path(), Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(text, "Rust dev");
    }

    #[tokio::test]
    async fn test_upload_wins_over_inline_text() {
        let dir = tempfile::tempdir().unwrap();
        let upload = UploadedDocument {
            file_name: "cv.txt".into(),
            bytes: Bytes::from_static(b" from file "),
        };
        let text = resolve_resume_text(
            Some(upload),
            Some("from form".into()),
            dir.path(),
            Uuid::new_v4(),
        )
        .await
        .unwrap();
        assert_eq!(text, " from file ");
    }

    #[tokio::test]
    async fn test_analyze_missing_job_description() {
        let dir = tempfile::tempdir().unwrap();
        let err = analyze(text_form(Some("Rust dev"), Some("   ")), &scorer(), dir.path(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingJobDescription));
    }

    #[tokio::test]
    async fn test_analyze_missing_both_reports_resume() {
        let dir = tempfile::tempdir().unwrap();
        let err = analyze(text_form(None, None), &scorer(), dir.path(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingResume));
    }

    #[tokio::test]
    async fn test_analyze_unsupported_upload() {
        let dir = tempfile::tempdir().unwrap();
        let form = AnalyzeForm {
            resume: Some(UploadedDocument {
                file_name: "resume.csv".into(),
                bytes: Bytes::from_static(b"a,b,c"),
            }),
            resume_text: None,
            job_description: Some("Rust".into()),
        };
        let err = analyze(form, &scorer(), dir.path(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Extraction(ExtractError::UnsupportedFormat)
        ));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_analyze_success_message_matches_score() {
        let dir = tempfile::tempdir().unwrap();
        let result = analyze(
            text_form(
                Some("Experienced software engineer skilled in Python"),
                Some("Looking for a Python developer"),
            ),
            &scorer(),
            dir.path(),
            Uuid::new_v4(),
        )
        .await
        .unwrap();
        assert!(result.similarity_score > 0.0 && result.similarity_score <= 100.0);
        assert_eq!(result, SimilarityResult::new(result.similarity_score));
    }
}
