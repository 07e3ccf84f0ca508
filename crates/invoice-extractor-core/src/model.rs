//! Trait for the external model that turns document text into invoice JSON.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::InvoiceData;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The service could not be reached (connect failure, timeout, TLS...).
    #[error("service unavailable: {0}")]
    Unavailable(String),
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The service answered, but not with a JSON object.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A completion service that extracts structured invoice data.
pub trait ExtractionModel: Send + Sync {
    /// Human-readable provider name used in error messages (e.g. "OpenAI").
    fn name(&self) -> &str;

    /// Send `prompt` as the instruction and `text` as the document, and
    /// return the JSON object the model produced.
    fn extract<'a>(
        &'a self,
        prompt: &'a str,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<InvoiceData, ModelError>> + Send + 'a>>;
}

/// Parse the raw message content of a model reply into a JSON object.
pub fn parse_model_output(content: &str) -> Result<InvoiceData, ModelError> {
    let value: serde_json::Value = serde_json::from_str(content.trim())
        .map_err(|e| ModelError::InvalidResponse(format!("model output is not JSON: {e}")))?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(ModelError::InvalidResponse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
