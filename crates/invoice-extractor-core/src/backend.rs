use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Trait for PDF text extraction backends.
///
/// Implementors turn the raw bytes of an uploaded document into plain text.
/// Extraction is synchronous; callers on an async runtime are expected to
/// move it onto a blocking thread.
pub trait PdfBackend: Send + Sync {
    /// Extract the full text content of every page, in page order.
    fn extract_text(&self, data: &[u8]) -> Result<String, BackendError>;
}
