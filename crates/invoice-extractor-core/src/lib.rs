use thiserror::Error;

pub mod backend;
pub mod config;
pub mod config_file;
pub mod model;
pub mod pipeline;
pub mod schema;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend};
pub use config::{Config, ConfigError};
pub use model::{ExtractionModel, ModelError, parse_model_output};
pub use pipeline::extract_invoice;
pub use schema::{EXTRACTION_PROMPT, INVOICE_FIELDS, unknown_fields, user_message};

/// The structured invoice object returned by the model, passed through as-is.
pub type InvoiceData = serde_json::Map<String, serde_json::Value>;

/// Failure of a single extraction run.
///
/// Each variant maps to one class of HTTP error in the web layer.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{0}")]
    Pdf(#[from] BackendError),
    #[error("{source}")]
    Model {
        /// Display name of the model provider (e.g. "OpenAI").
        provider: String,
        source: ModelError,
    },
    #[error("extraction task failed: {0}")]
    Task(String),
}
