use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use invoice_extractor_core::ExtractError;

use crate::models::ErrorResponse;

/// Every way a request can fail, with the message sent back to the caller.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid file type. Please upload a PDF.")]
    InvalidFileType,
    #[error("No file uploaded")]
    MissingFile,
    #[error("Failed to read upload: {message}")]
    Upload { status: StatusCode, message: String },
    #[error("Error reading PDF: {0}")]
    PdfRead(String),
    #[error("Error calling {provider} API: {message}")]
    Model { provider: String, message: String },
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidFileType | ApiError::PdfRead(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upload { status, .. } => *status,
            ApiError::Model { .. } | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Pdf(e) => ApiError::PdfRead(e.to_string()),
            ExtractError::Model { provider, source } => ApiError::Model {
                provider,
                message: source.to_string(),
            },
            ExtractError::Task(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::info!(status = status.as_u16(), error = %self, "request rejected");
        }
        (
            status,
            Json(ErrorResponse {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
