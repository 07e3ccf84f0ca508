use std::sync::Arc;

use invoice_extractor_core::{ExtractionModel, PdfBackend};

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub pdf: Arc<dyn PdfBackend>,
    pub model: Arc<dyn ExtractionModel>,
}
