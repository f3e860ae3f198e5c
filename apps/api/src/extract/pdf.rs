use std::path::Path;

use tracing::debug;

use crate::extract::ExtractError;

/// Concatenates the text of every page in page order, with no separator
/// between pages.
pub fn extract_pdf_text(path: &Path) -> Result<String, ExtractError> {
    let pages =
        pdf_extract::extract_text_by_pages(path).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    debug!("Extracted {} PDF page(s)", pages.len());
    Ok(pages.concat())
}
