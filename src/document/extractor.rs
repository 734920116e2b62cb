use crate::{Error, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extracts the plain-text content of a PDF held in memory.
    async fn extract(&self, bytes: Vec<u8>) -> Result<String>;
}

/// Text extraction backed by the `pdf-extract` crate.
///
/// Parsing is CPU-bound, so it runs on the blocking pool. The library panics on
/// some malformed inputs; those surface as a join error and are reported the
/// same way as an ordinary parse failure.
#[derive(Debug, Default, Clone)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<String> {
        debug!("Extracting text from {} byte PDF", bytes.len());

        let result = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| {
                warn!("PDF extraction task aborted: {}", e);
                Error::extraction("Failed to extract text from PDF")
            })?;

        match result {
            Ok(text) => {
                debug!("Extracted {} characters of text", text.len());
                Ok(text)
            }
            Err(e) => {
                warn!("pdf-extract failed: {}", e);
                Err(Error::extraction(format!(
                    "Failed to extract text from PDF: {e}"
                )))
            }
        }
    }
}
