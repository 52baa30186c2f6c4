//! Candidate material intake — PDF text extraction for uploads.
//!
//! PDF parsing is CPU-bound and runs inside `tokio::task::spawn_blocking`.

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Cheap header check before handing bytes to the parser.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Extracts the text layer of an uploaded PDF.
///
/// Non-PDF input and PDFs the parser cannot read are validation errors: the
/// request is rejected before any run starts.
pub async fn extract_pdf_text(bytes: Bytes) -> Result<String, AppError> {
    if !looks_like_pdf(&bytes) {
        return Err(AppError::Validation(
            "Uploaded file is not a PDF".to_string(),
        ));
    }

    let size = bytes.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            // The parser panics on some malformed files.
            if e.is_panic() {
                AppError::Validation("Could not read PDF".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!(
                    "spawn_blocking failed in PDF extraction: {e}"
                ))
            }
        })?
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?;

    debug!(bytes = size, chars = text.chars().count(), "Extracted PDF text");
    Ok(text)
}
