use mupdf::{Document, TextPageFlags};

use invoice_extractor_core::{BackendError, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the rest of the workspace does not
/// transitively depend on it.
///
/// Every page is read, headers and footers included, since invoice
/// letterheads usually carry the vendor details.
///
/// MuPDF silently repairs damaged files. A repaired file that still yields
/// text is accepted; one that yields none (no pages, blank pages, or content
/// streams that could not be decoded) is reported as an extraction error.
#[derive(Default)]
pub struct MupdfBackend {
    /// Stop after this many pages. `None` reads the whole document.
    max_pages: Option<usize>,
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only read the first `max_pages` pages. Pass `0` to read everything.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = if max_pages > 0 { Some(max_pages) } else { None };
        self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_text(&self, data: &[u8]) -> Result<String, BackendError> {
        let document = Document::from_bytes(data, "application/pdf")
            .map_err(|e| BackendError::OpenError(e.to_string()))?;

        let limit = self.max_pages.unwrap_or(usize::MAX);
        let mut text = String::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
            .take(limit)
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            // Block/line iteration gives one line of output per text line
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    text.push_str(&line_text);
                    text.push('\n');
                }
            }
        }

        if text.trim().is_empty() {
            return Err(BackendError::ExtractionError("no extractable text found".into()));
        }

        Ok(text)
    }
}
