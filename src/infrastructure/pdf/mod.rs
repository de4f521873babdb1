//! PDF text extraction
//!
//! Wraps lopdf with error handling for:
//! - Unreadable or missing files
//! - Files that are not PDFs or are corrupted
//! - Parser panics on malformed input

use crate::domain::conversion::ExtractionError;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Extracts plain text from PDF files on disk
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the text of every page, in page order, with no separator between pages.
    ///
    /// Parsing runs on the blocking pool; a panic inside the parser is reported
    /// as an extraction error rather than unwinding into the caller.
    pub async fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let path: PathBuf = path.to_path_buf();
        let start_time = std::time::Instant::now();

        let text = tokio::task::spawn_blocking(move || extract_pages(&path))
            .await
            .map_err(|e| ExtractionError(format!("PDF parser aborted: {}", e)))??;

        tracing::info!(
            latency_ms = start_time.elapsed().as_millis(),
            text_length = text.len(),
            "PDF text extracted"
        );

        Ok(text)
    }
}

/// Synchronous page-by-page extraction
pub fn extract_pages(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path).map_err(|e| ExtractionError(e.to_string()))?;
    let document = Document::load_mem(&bytes).map_err(|e| ExtractionError(e.to_string()))?;

    let pages = document.get_pages();
    tracing::debug!(page_count = pages.len(), "PDF loaded");

    let mut text = String::new();
    // get_pages is keyed by page number, so iteration follows document order
    for page_number in pages.keys() {
        let page_text = document
            .extract_text(&[*page_number])
            .map_err(|e| ExtractionError(format!("page {}: {}", page_number, e)))?;
        text.push_str(&page_text);
    }

    Ok(text)
}
