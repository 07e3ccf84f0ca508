//! The extraction pass: PDF bytes to text, text to invoice JSON.

use std::sync::Arc;

use crate::schema::{EXTRACTION_PROMPT, unknown_fields};
use crate::{ExtractError, ExtractionModel, InvoiceData, PdfBackend};

/// Run text extraction and then the model call for a single upload.
///
/// Extraction runs on the blocking thread pool since PDF backends are
/// synchronous. The model output is returned unchanged.
pub async fn extract_invoice(
    pdf: Arc<dyn PdfBackend>,
    model: &dyn ExtractionModel,
    data: Vec<u8>,
) -> Result<InvoiceData, ExtractError> {
    let text = tokio::task::spawn_blocking(move || pdf.extract_text(&data))
        .await
        .map_err(|e| ExtractError::Task(e.to_string()))??;

    if text.trim().is_empty() {
        tracing::warn!("PDF contains no extractable text");
    }

    tracing::debug!(model = model.name(), chars = text.len(), "calling extraction model");

    let invoice = model
        .extract(EXTRACTION_PROMPT, &text)
        .await
        .map_err(|source| ExtractError::Model {
            provider: model.name().to_string(),
            source,
        })?;

    let extra = unknown_fields(&invoice);
    if !extra.is_empty() {
        tracing::warn!(fields = ?extra, "model returned fields outside the invoice schema");
    }

    Ok(invoice)
}
