//! Upload staging — writes an uploaded resume to a uniquely named temp file,
//! extracts it, and removes the file on every exit path.

use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{declared_extension, extract_text, ExtractError};

/// A resume file received in the request body. Lives only for the request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Client-supplied name; used for extension dispatch only, never on disk.
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedDocument {
    /// Browsers submit an untouched file input as a part with an empty
    /// filename and no content.
    pub fn is_blank(&self) -> bool {
        self.file_name.is_empty() && self.bytes.is_empty()
    }
}

/// Stages `upload` under `upload_dir` as `<request_id>-<random>` and extracts
/// its text. The staged file is a guard owned by the blocking task, so it is
/// deleted when extraction returns, fails, or panics.
pub async fn extract_upload(
    upload: UploadedDocument,
    upload_dir: PathBuf,
    request_id: Uuid,
) -> Result<String, AppError> {
    let extension = declared_extension(&upload.file_name);
    debug!(
        file_name = %upload.file_name,
        bytes = upload.bytes.len(),
        "Staging uploaded resume"
    );

    tokio::task::spawn_blocking(move || {
        let staged = stage(&upload_dir, request_id, &upload.bytes)?;
        extract_text(staged.path(), extension.as_deref())
        // `staged` dropped here: file removed on success and on error.
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?
    .map_err(AppError::from)
}

fn stage(upload_dir: &Path, request_id: Uuid, bytes: &[u8]) -> Result<NamedTempFile, ExtractError> {
    let mut file = tempfile::Builder::new()
        .prefix(&format!("{request_id}-"))
        .tempfile_in(upload_dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}
