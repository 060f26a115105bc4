use crate::error::ExtractError;

/// Extract the text layer of a PDF.
///
/// Parsing is CPU-bound and the parser panics on some malformed files, so it
/// runs on the blocking pool and a panic surfaces as an extraction error.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, ExtractError> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| ExtractError::Pdf(format!("parser task failed: {e}")))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))
}
