//! Request decoding for `POST /analyze`. Accepts `multipart/form-data` (with an
//! optional resume file) or `application/x-www-form-urlencoded` (text only).

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::Deserialize;

use crate::analysis::upload::UploadedDocument;
use crate::errors::AppError;

pub const RESUME_FIELD: &str = "resume";
pub const RESUME_TEXT_FIELD: &str = "resume_text";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// Raw form input, before any trimming or validation.
#[derive(Debug, Default)]
pub struct AnalyzeForm {
    pub resume: Option<UploadedDocument>,
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextFields {
    resume_text: Option<String>,
    job_description: Option<String>,
}

#[async_trait]
impl<S> FromRequest<S> for AnalyzeForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);

        match content_type {
            None => Ok(AnalyzeForm::default()),
            Some(ct) if ct.starts_with("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Self::from_multipart(multipart).await
            }
            Some(_) => {
                let Form(fields) = Form::<TextFields>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Ok(AnalyzeForm {
                    resume: None,
                    resume_text: fields.resume_text,
                    job_description: fields.job_description,
                })
            }
        }
    }
}

impl AnalyzeForm {
    /// Reads every part. Repeated fields keep their first value; unknown
    /// fields are skipped.
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = AnalyzeForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match name.as_str() {
                RESUME_FIELD if form.resume.is_none() => {
                    // A part without a filename is a plain text value, not an upload.
                    let Some(file_name) = field.file_name().map(str::to_owned) else {
                        continue;
                    };
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.body_text()))?;
                    let upload = UploadedDocument { file_name, bytes };
                    if !upload.is_blank() {
                        form.resume = Some(upload);
                    }
                }
                RESUME_TEXT_FIELD if form.resume_text.is_none() => {
                    form.resume_text = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::BadRequest(e.body_text()))?,
                    );
                }
                JOB_DESCRIPTION_FIELD if form.job_description.is_none() => {
                    form.job_description = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| AppError::BadRequest(e.body_text()))?,
                    );
                }
                _ => {}
            }
        }

        Ok(form)
    }
}
