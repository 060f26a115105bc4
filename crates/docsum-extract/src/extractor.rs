use async_trait::async_trait;
use tracing::debug;

use crate::docx::extract_docx_text;
use crate::error::ExtractError;
use crate::format::DocumentFormat;
use crate::pdf::extract_pdf_text;
use crate::text::extract_text;

/// Turns raw document bytes into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(
        &self,
        bytes: Vec<u8>,
        format: DocumentFormat,
    ) -> Result<String, ExtractError>;
}

/// Dispatches on [`DocumentFormat`] to the format-specific readers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatExtractor;

#[async_trait]
impl TextExtractor for FormatExtractor {
    async fn extract(
        &self,
        bytes: Vec<u8>,
        format: DocumentFormat,
    ) -> Result<String, ExtractError> {
        let size = bytes.len();
        let text = match format {
            DocumentFormat::Text => extract_text(bytes)?,
            DocumentFormat::Pdf => extract_pdf_text(bytes).await?,
            DocumentFormat::Docx | DocumentFormat::Doc => extract_docx_text(&bytes)?,
        };

        debug!(%format, bytes = size, chars = text.chars().count(), "document text extracted");
        Ok(text)
    }
}
